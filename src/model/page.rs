//! Page-level types.

use super::{Block, BlockContent, PageMarker};
use serde::{Deserialize, Serialize};

/// A page projected from a document's block order.
///
/// When a page was started by a `new-page` marker, the marker is kept as the
/// first element of `blocks` for metadata purposes; [`Page::body`] skips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed, by position)
    pub number: u32,

    /// Blocks on the page, marker included
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The marker that started this page, if any.
    pub fn marker(&self) -> Option<&PageMarker> {
        match self.blocks.first().map(|b| &b.content) {
            Some(BlockContent::NewPage(marker)) => Some(marker),
            _ => None,
        }
    }

    /// Page title from the marker.
    pub fn title(&self) -> Option<&str> {
        self.marker().map(|m| m.page_title.as_str())
    }

    /// Blocks to render as page content (marker excluded).
    pub fn body(&self) -> &[Block] {
        if self.marker().is_some() {
            &self.blocks[1..]
        } else {
            &self.blocks
        }
    }

    /// Check if the page holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page (marker included).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get plain text content of the page body.
    pub fn plain_text(&self) -> String {
        self.body()
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(1);
        assert_eq!(page.number, 1);
        assert!(page.is_empty());
        assert!(page.marker().is_none());
        assert!(page.body().is_empty());
    }

    #[test]
    fn test_body_skips_marker() {
        let mut page = Page::new(2);
        page.add_block(Block::new(BlockContent::new_page("Results", 2)));
        page.add_block(Block::new(BlockContent::paragraph("Body")));

        assert_eq!(page.title(), Some("Results"));
        assert_eq!(page.block_count(), 2);
        assert_eq!(page.body().len(), 1);
        assert_eq!(page.plain_text(), "Body");
    }
}
