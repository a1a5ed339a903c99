//! # reportdoc
//!
//! Block-based report document editing core for Rust.
//!
//! A report is an ordered list of typed blocks (headings, paragraphs, lists,
//! charts, tables, page markers). This library edits that list with bounded
//! undo/redo, splits it into pages for export, and builds chart and table
//! blocks from survey response data.
//!
//! ## Quick Start
//!
//! ```
//! use reportdoc::{BlockKind, Editor, EditorOptions};
//!
//! let mut editor = Editor::new(EditorOptions::default());
//! let first = editor.document().blocks[0].id.clone();
//!
//! editor.insert_block(BlockKind::Paragraph, Some(&first));
//! editor.insert_new_page(Some("Results"), None);
//! assert_eq!(editor.pages().len(), 2);
//!
//! editor.undo();
//! assert_eq!(editor.pages().len(), 1);
//! ```
//!
//! ## Features
//!
//! - **Closed block set**: fourteen block types with a stable JSON shape
//! - **Snapshot history**: 50-step undo/redo, composite inserts undo as one step
//! - **Pagination**: `new-page` markers split the block list into pages
//! - **Survey extraction**: tiered answer matching into histograms, charts, tables
//! - **Parallel processing**: Uses Rayon for large response corpora
//! - **Adapters**: pluggable persistence and page export, run in the background

pub mod adapter;
pub mod editor;
pub mod error;
pub mod extract;
pub mod model;
pub mod paginate;
pub mod render;

// Re-export commonly used types
pub use adapter::{
    export_document, ExportAdapter, ExportArtifact, ExportTarget, JsonFilePersistence,
    MarkdownExporter, PageGeometry, PendingJob, PersistenceAdapter, SaveReceipt, SaveRequest,
};
pub use editor::{BlockPatch, Editor, EditorEvent, EditorOptions, History};
pub use error::{Error, Result};
pub use extract::{
    extract_histogram, ExtractOptions, Histogram, Question, QuestionId, ResponseCorpus,
    ResponseRecord, SurveyScope,
};
pub use model::{
    Block, BlockContent, BlockId, BlockKind, Cell, ChartDatum, ChartPayload, ChartType, Document,
    JsonFormat, Page, TableData, TablePayload,
};
pub use paginate::{page_count, paginate};
pub use render::RenderOptions;

use std::fs;
use std::path::Path;

/// Read a document from its JSON persistence shape.
///
/// # Example
///
/// ```no_run
/// use reportdoc::open_document;
///
/// let doc = open_document("report.json").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn open_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let text = fs::read_to_string(path)?;
    Document::from_json(&text)
}

/// Read a response corpus (`{ "<surveyType>": [records...] }`).
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<ResponseCorpus> {
    let text = fs::read_to_string(path)?;
    ResponseCorpus::from_json(&text)
}

/// Read a question list (JSON array).
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a document to `path` in its JSON persistence shape.
pub fn write_document<P: AsRef<Path>>(doc: &Document, path: P, format: JsonFormat) -> Result<()> {
    let json = doc.to_json(format)?;
    fs::write(path, json)?;
    Ok(())
}

/// Convert a document file to Markdown.
///
/// # Example
///
/// ```no_run
/// use reportdoc::to_markdown;
///
/// let markdown = to_markdown("report.json").unwrap();
/// std::fs::write("report.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = open_document(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a document file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = open_document(path)?;
    render::to_markdown(&doc, options)
}

/// Convert a document file to plain text, one form-feed separated section per page.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = open_document(path)?;
    render::to_text(&doc)
}
