//! Pure document mutations.
//!
//! Every function takes the prior document by reference and returns a new
//! one; the input is never modified. Operations that find nothing to do
//! (missing id, first/last-position moves) return `None` so the caller can
//! keep the prior document and skip recording a history entry.

use super::BlockPatch;
use crate::model::{Block, BlockContent, BlockId, Document};

/// Insert a block after `after` (or at the end). Returns the new block id.
///
/// Chart and table payloads must be computed by the caller beforehand
/// (see [`crate::extract`]); the store only places them.
pub fn insert_block(
    doc: &Document,
    content: BlockContent,
    after: Option<&BlockId>,
) -> (Document, BlockId) {
    let (next, mut ids) = insert_blocks(doc, vec![content], after);
    let id = ids.remove(0);
    (next, id)
}

/// Insert several blocks contiguously after `after` (or at the end), as one
/// mutation. Returns the new ids in insertion order.
pub fn insert_blocks(
    doc: &Document,
    contents: Vec<BlockContent>,
    after: Option<&BlockId>,
) -> (Document, Vec<BlockId>) {
    let index = insertion_index(doc, after);
    let blocks: Vec<Block> = contents.into_iter().map(Block::new).collect();
    let ids = blocks.iter().map(|b| b.id.clone()).collect::<Vec<_>>();

    let mut next = doc.clone();
    next.blocks.splice(index..index, blocks);
    next.touch();
    log::debug!("insert: {} block(s) at index {}", ids.len(), index);
    (next, ids)
}

/// Insert a `new-page` marker followed by a heading carrying the page title.
///
/// The marker is numbered after the existing markers (the first page has no
/// marker, so the first inserted marker is page 2). Returns the marker id.
pub fn insert_new_page(
    doc: &Document,
    title: Option<&str>,
    after: Option<&BlockId>,
) -> (Document, BlockId) {
    let number = doc.page_marker_count() as u32 + 2;
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| format!("Page {}", number));

    let (next, mut ids) = insert_blocks(
        doc,
        vec![
            BlockContent::new_page(title.clone(), number),
            BlockContent::heading(1, title),
        ],
        after,
    );
    (next, ids.remove(0))
}

/// Apply `patch` to the block's payload. `None` if the block does not exist.
pub fn update_block(doc: &Document, id: &BlockId, patch: &BlockPatch) -> Option<Document> {
    let index = doc.position(id)?;
    let mut next = doc.clone();
    patch.apply_to(&mut next.blocks[index].content);
    next.touch();
    log::debug!("update: {}", id);
    Some(next)
}

/// Remove the block. `None` if the block does not exist.
pub fn delete_block(doc: &Document, id: &BlockId) -> Option<Document> {
    let index = doc.position(id)?;
    let mut next = doc.clone();
    next.blocks.remove(index);
    next.touch();
    log::debug!("delete: {}", id);
    Some(next)
}

/// Swap the block with its predecessor. `None` if missing or already first.
pub fn move_block_up(doc: &Document, id: &BlockId) -> Option<Document> {
    let index = doc.position(id)?;
    if index == 0 {
        return None;
    }
    Some(swap(doc, index - 1, index))
}

/// Swap the block with its successor. `None` if missing or already last.
pub fn move_block_down(doc: &Document, id: &BlockId) -> Option<Document> {
    let index = doc.position(id)?;
    if index + 1 >= doc.blocks.len() {
        return None;
    }
    Some(swap(doc, index, index + 1))
}

/// Insert a deep copy with a fresh id right after the source block.
/// `None` if the block does not exist.
pub fn duplicate_block(doc: &Document, id: &BlockId) -> Option<(Document, BlockId)> {
    let index = doc.position(id)?;
    let copy = doc.blocks[index].duplicate();
    let copy_id = copy.id.clone();

    let mut next = doc.clone();
    next.blocks.insert(index + 1, copy);
    next.touch();
    log::debug!("duplicate: {} -> {}", id, copy_id);
    Some((next, copy_id))
}

fn swap(doc: &Document, a: usize, b: usize) -> Document {
    let mut next = doc.clone();
    next.blocks.swap(a, b);
    next.touch();
    log::debug!("move: swapped positions {} and {}", a, b);
    next
}

fn insertion_index(doc: &Document, after: Option<&BlockId>) -> usize {
    match after {
        None => doc.blocks.len(),
        Some(id) => match doc.position(id) {
            Some(index) => index + 1,
            None => {
                log::warn!("insert anchor {} not found, appending at end", id);
                doc.blocks.len()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    fn doc_of(texts: &[&str]) -> Document {
        Document::from_blocks(
            "T",
            texts
                .iter()
                .map(|t| Block::with_id(*t, BlockContent::paragraph(*t)))
                .collect(),
        )
    }

    fn order(doc: &Document) -> Vec<&str> {
        doc.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_insert_at_end_and_after() {
        let doc = doc_of(&["a", "b"]);
        let (end, _) = insert_block(&doc, BlockContent::empty(BlockKind::Quote), None);
        assert_eq!(end.blocks[2].kind(), BlockKind::Quote);

        let (mid, id) = insert_block(&doc, BlockContent::empty(BlockKind::Divider), Some(&"a".into()));
        assert_eq!(mid.blocks[1].id, id);
        assert_eq!(doc.block_count(), 2, "input must be untouched");
    }

    #[test]
    fn test_insert_after_missing_anchor_appends() {
        let doc = doc_of(&["a"]);
        let (next, id) = insert_block(&doc, BlockContent::paragraph("x"), Some(&"zz".into()));
        assert_eq!(next.blocks.last().map(|b| &b.id), Some(&id));
    }

    #[test]
    fn test_moves_and_boundaries() {
        let doc = doc_of(&["a", "b", "c"]);
        let up = move_block_up(&doc, &"b".into()).unwrap();
        assert_eq!(order(&up), ["b", "a", "c"]);
        let down = move_block_down(&doc, &"b".into()).unwrap();
        assert_eq!(order(&down), ["a", "c", "b"]);

        assert!(move_block_up(&doc, &"a".into()).is_none());
        assert!(move_block_down(&doc, &"c".into()).is_none());
        assert!(move_block_up(&doc, &"nope".into()).is_none());
    }

    #[test]
    fn test_delete() {
        let doc = doc_of(&["a", "b"]);
        let next = delete_block(&doc, &"a".into()).unwrap();
        assert_eq!(order(&next), ["b"]);
        assert!(delete_block(&doc, &"x".into()).is_none());
    }

    #[test]
    fn test_update_missing_is_none() {
        let doc = doc_of(&["a"]);
        assert!(update_block(&doc, &"x".into(), &BlockPatch::new().with_content("y")).is_none());
    }

    #[test]
    fn test_new_page_numbering() {
        let doc = doc_of(&["a"]);
        let (one, marker) = insert_new_page(&doc, None, None);
        assert_eq!(one.block_count(), 3);
        assert_eq!(one.blocks[1].id, marker);
        assert_eq!(
            one.blocks[1].content,
            BlockContent::new_page("Page 2", 2)
        );
        assert_eq!(one.blocks[2].plain_text(), "Page 2");

        let (two, _) = insert_new_page(&one, Some("Appendix"), None);
        assert_eq!(two.blocks[3].content, BlockContent::new_page("Appendix", 3));
    }
}
