//! Document-level types.

use super::{Block, BlockContent, BlockId};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Layout of serialized document JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Title used when a document is synthesized without one.
pub const DEFAULT_TITLE: &str = "Untitled Report";

/// A report document: metadata plus an ordered block list.
///
/// Block order is the sole source of reading and rendering order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document id
    pub id: String,

    /// Document title
    pub title: String,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Time of the last mutation
    pub updated_at: DateTime<Utc>,

    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Synthesize a document with a title heading and an empty paragraph.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let blocks = vec![
            Block::new(BlockContent::heading(1, title.clone())),
            Block::new(BlockContent::paragraph("")),
        ];
        Self::from_blocks(title, blocks)
    }

    /// Create a document with no blocks.
    pub fn empty(title: impl Into<String>) -> Self {
        Self::from_blocks(title, Vec::new())
    }

    /// Create a document from existing blocks.
    pub fn from_blocks(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            blocks,
        }
    }

    /// Parse a document from its JSON persistence shape and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize the document to its JSON persistence shape.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };
        json.map_err(|e| Error::Render(format!("cannot serialize document {}: {}", self.id, e)))
    }

    /// Check structural invariants (unique block ids).
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !seen.insert(&block.id) {
                return Err(Error::InvalidDocument(format!(
                    "duplicate block id: {}",
                    block.id
                )));
            }
        }
        Ok(())
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Index of the block with the given id.
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Get a block by id.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Check if a block with the given id exists.
    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of `new-page` markers in the document.
    pub fn page_marker_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_page_marker()).count()
    }

    /// Block ids in order.
    pub fn block_ids(&self) -> Vec<&BlockId> {
        self.blocks.iter().map(|b| &b.id).collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| !b.is_page_marker())
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}
