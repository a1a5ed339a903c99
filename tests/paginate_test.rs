//! Integration tests for pagination.

use proptest::prelude::*;
use reportdoc::{page_count, paginate, Block, BlockContent, Document, Editor};

fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|s| Block::new(BlockContent::paragraph(s))),
        (1u8..=3, "[A-Z][a-z]{0,8}").prop_map(|(l, s)| Block::new(BlockContent::heading(l, s))),
        Just(Block::new(BlockContent::Divider)),
        (2u32..20).prop_map(|n| Block::new(BlockContent::new_page(format!("P{}", n), n))),
    ]
}

#[test]
fn test_report_with_trailing_marker() {
    let blocks = vec![
        Block::new(BlockContent::heading(1, "Report")),
        Block::new(BlockContent::paragraph("")),
        Block::new(BlockContent::new_page("Page 2", 2)),
    ];
    let pages = paginate(&blocks);

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].blocks, blocks[..2].to_vec());
    assert_eq!(pages[1].blocks, blocks[2..].to_vec());
    assert_eq!(pages[1].title(), Some("Page 2"));
    assert!(pages[1].body().is_empty());
}

#[test]
fn test_leading_marker_has_no_blank_page() {
    let blocks = vec![
        Block::new(BlockContent::new_page("Intro", 2)),
        Block::new(BlockContent::paragraph("text")),
    ];
    let pages = paginate(&blocks);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[0].blocks.len(), 2);
}

#[test]
fn test_empty_document_has_one_page() {
    let pages = paginate(&[]);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_empty());
}

#[test]
fn test_consecutive_markers() {
    let blocks = vec![
        Block::new(BlockContent::paragraph("a")),
        Block::new(BlockContent::new_page("B", 2)),
        Block::new(BlockContent::new_page("C", 3)),
    ];
    let pages = paginate(&blocks);
    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages.iter().map(|p| p.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_editor_pages_follow_new_page_inserts() {
    let mut editor = Editor::default();
    editor.insert_new_page(None, None);
    editor.insert_new_page(None, None);

    let pages = editor.pages();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1].title(), Some("Page 2"));
    assert_eq!(pages[2].title(), Some("Page 3"));
    assert_eq!(page_count(&editor.document().blocks), 3);
}

#[test]
fn test_plain_text_skips_markers() {
    let doc = Document::from_blocks(
        "T",
        vec![
            Block::new(BlockContent::paragraph("one")),
            Block::new(BlockContent::new_page("Hidden", 2)),
            Block::new(BlockContent::paragraph("two")),
        ],
    );
    assert_eq!(doc.plain_text(), "one\n\ntwo");
}

proptest! {
    #[test]
    fn prop_pages_concatenate_to_input(blocks in prop::collection::vec(arb_block(), 0..40)) {
        let pages = paginate(&blocks);
        prop_assert!(!pages.is_empty());
        prop_assert_eq!(pages.len(), page_count(&blocks));

        let flattened: Vec<Block> = pages.iter().flat_map(|p| p.blocks.iter().cloned()).collect();
        prop_assert_eq!(flattened, blocks.clone());

        for page in pages.iter().skip(1) {
            prop_assert!(page.blocks[0].is_page_marker());
        }
        if !blocks.is_empty() {
            prop_assert!(pages.iter().all(|p| !p.is_empty()));
        }
    }
}
