//! Document model types for report content.
//!
//! This module defines the block-oriented representation edited by
//! [`crate::editor`], paginated by [`crate::paginate`] and handed to the
//! persistence/export adapters. Every type is plain data (no handles, no
//! cycles), so snapshots are taken by deep value copy.

mod block;
mod chart;
mod document;
mod page;
mod table;

pub use block::{
    Block, BlockContent, BlockId, BlockKind, ImagePayload, ListPayload, PageMarker, SpacerPayload,
    TextPayload,
};
pub use chart::{ChartDatum, ChartPayload, ChartType};
pub use document::{Document, JsonFormat, DEFAULT_TITLE};
pub use page::Page;
pub use table::{Cell, TableData, TablePayload};
