//! Page layout derived from `new-page` markers.
//!
//! Pagination is a pure projection of the block order: a marker closes the
//! page being accumulated and starts the next one, carrying the marker as
//! its first block. A marker that arrives while the current page is still
//! empty (e.g. the very first block) does not split, so no blank leading
//! page is produced. At least one page is always returned.

use crate::model::{Block, Page};

/// Split blocks into pages at `new-page` markers.
///
/// Concatenating the returned pages' blocks reproduces `blocks` exactly.
pub fn paginate(blocks: &[Block]) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page::new(1);

    for block in blocks {
        if block.is_page_marker() && !current.is_empty() {
            let number = current.number + 1;
            pages.push(std::mem::replace(&mut current, Page::new(number)));
        }
        current.add_block(block.clone());
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }

    log::debug!("paginate: {} block(s) -> {} page(s)", blocks.len(), pages.len());
    pages
}

/// Number of pages `paginate` would produce.
pub fn page_count(blocks: &[Block]) -> usize {
    let splits = blocks
        .iter()
        .enumerate()
        .filter(|(i, b)| *i > 0 && b.is_page_marker())
        .count();
    splits + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockContent;

    fn para(text: &str) -> Block {
        Block::new(BlockContent::paragraph(text))
    }

    fn marker(n: u32) -> Block {
        Block::new(BlockContent::new_page(format!("Page {}", n), n))
    }

    #[test]
    fn test_empty_input_yields_one_empty_page() {
        let pages = paginate(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].number, 1);
        assert_eq!(page_count(&[]), 1);
    }

    #[test]
    fn test_no_markers_single_page() {
        let blocks = vec![para("a"), para("b")];
        let pages = paginate(&blocks);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blocks, blocks);
    }

    #[test]
    fn test_leading_marker_does_not_split() {
        let blocks = vec![marker(1), para("a"), marker(2), para("b")];
        let pages = paginate(&blocks);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title(), Some("Page 1"));
        assert_eq!(pages[1].title(), Some("Page 2"));
        assert_eq!(pages[1].number, 2);
        assert_eq!(page_count(&blocks), 2);
    }

    #[test]
    fn test_consecutive_markers() {
        let blocks = vec![para("a"), marker(2), marker(3)];
        let pages = paginate(&blocks);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].body().len(), 0);
        assert_eq!(pages[2].body().len(), 0);
        assert_eq!(page_count(&blocks), 3);
    }
}
