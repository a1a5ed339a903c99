//! Boundaries to the outside world: persistence and page export.
//!
//! The editor core never talks to storage or a renderer directly. It builds
//! a [`SaveRequest`] or a list of pages and hands them to an adapter.

mod export;
mod job;
mod persist;

pub use export::{export_document, ExportAdapter, ExportArtifact, ExportTarget, MarkdownExporter, PageGeometry};
pub use job::{spawn_export, spawn_save, CancelToken, PendingJob};
pub use persist::{cache_key, JsonFilePersistence, PersistenceAdapter, SaveReceipt, SaveRequest};
