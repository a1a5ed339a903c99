//! Block-level types.
//!
//! A block is one typed unit of document content. The variant set is closed;
//! a block's variant never changes after creation, only its payload does.

use super::{ChartPayload, TablePayload};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a block within a document.
///
/// Generated ids are UUID v4 strings; ids coming from imported documents are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh, never-reused id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The closed set of block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Top-level heading
    #[serde(rename = "heading1")]
    Heading1,
    /// Section heading
    #[serde(rename = "heading2")]
    Heading2,
    /// Sub-section heading
    #[serde(rename = "heading3")]
    Heading3,
    /// Body text
    #[serde(rename = "paragraph")]
    Paragraph,
    /// Unordered list
    #[serde(rename = "bullet-list")]
    BulletList,
    /// Ordered list
    #[serde(rename = "numbered-list")]
    NumberedList,
    /// Block quote
    #[serde(rename = "quote")]
    Quote,
    /// Horizontal rule
    #[serde(rename = "divider")]
    Divider,
    /// Vertical whitespace
    #[serde(rename = "spacer")]
    Spacer,
    /// Visual page break (does not split pages)
    #[serde(rename = "page-break")]
    PageBreak,
    /// Page marker, starts a new page
    #[serde(rename = "new-page")]
    NewPage,
    /// Image
    #[serde(rename = "image")]
    Image,
    /// Chart built from response data
    #[serde(rename = "chart")]
    Chart,
    /// Table built from response data
    #[serde(rename = "table")]
    Table,
}

impl BlockKind {
    /// Every block kind, in palette order.
    pub const ALL: [BlockKind; 14] = [
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Paragraph,
        BlockKind::BulletList,
        BlockKind::NumberedList,
        BlockKind::Quote,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::PageBreak,
        BlockKind::NewPage,
        BlockKind::Image,
        BlockKind::Chart,
        BlockKind::Table,
    ];

    /// The serialized `type` string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::Heading3 => "heading3",
            BlockKind::Paragraph => "paragraph",
            BlockKind::BulletList => "bullet-list",
            BlockKind::NumberedList => "numbered-list",
            BlockKind::Quote => "quote",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::PageBreak => "page-break",
            BlockKind::NewPage => "new-page",
            BlockKind::Image => "image",
            BlockKind::Chart => "chart",
            BlockKind::Table => "table",
        }
    }

    /// Heading level (1-3) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            _ => None,
        }
    }

    /// Check if this kind needs data the store cannot synthesize (chart/table).
    pub fn is_data_backed(&self) -> bool {
        matches!(self, BlockKind::Chart | BlockKind::Table)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownBlockType(s.to_string()))
    }
}

/// Payload of text-bearing blocks (headings, paragraph, quote).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPayload {
    /// Text content
    pub content: String,
}

impl TextPayload {
    /// Create a text payload.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Payload of list blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPayload {
    /// List items, in display order
    pub items: Vec<String>,
}

impl Default for ListPayload {
    fn default() -> Self {
        Self {
            items: vec![String::new()],
        }
    }
}

/// Payload of spacer blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacerPayload {
    /// Height in pixels
    pub height: u32,
}

impl Default for SpacerPayload {
    fn default() -> Self {
        Self { height: 40 }
    }
}

/// Payload of the `new-page` marker block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMarker {
    /// Title shown for the page
    pub page_title: String,
    /// Page number at the time the marker was inserted (1-indexed)
    pub page_number: u32,
}

impl PageMarker {
    /// Create a page marker.
    pub fn new(page_title: impl Into<String>, page_number: u32) -> Self {
        Self {
            page_title: page_title.into(),
            page_number,
        }
    }
}

impl Default for PageMarker {
    fn default() -> Self {
        Self::new("New Page", 2)
    }
}

/// Payload of image blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePayload {
    /// Image source (URL or data URI)
    pub src: String,
    /// Alternative text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Caption shown below the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Display width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Type-specific block content.
///
/// Serialized with the `type` tag inlined next to the payload fields, so a
/// block reads as `{ "id": .., "type": "paragraph", "content": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockContent {
    /// Top-level heading
    #[serde(rename = "heading1")]
    Heading1(TextPayload),
    /// Section heading
    #[serde(rename = "heading2")]
    Heading2(TextPayload),
    /// Sub-section heading
    #[serde(rename = "heading3")]
    Heading3(TextPayload),
    /// Body text
    #[serde(rename = "paragraph")]
    Paragraph(TextPayload),
    /// Unordered list
    #[serde(rename = "bullet-list")]
    BulletList(ListPayload),
    /// Ordered list
    #[serde(rename = "numbered-list")]
    NumberedList(ListPayload),
    /// Block quote
    #[serde(rename = "quote")]
    Quote(TextPayload),
    /// Horizontal rule
    #[serde(rename = "divider")]
    Divider,
    /// Vertical whitespace
    #[serde(rename = "spacer")]
    Spacer(SpacerPayload),
    /// Visual page break
    #[serde(rename = "page-break")]
    PageBreak,
    /// Page marker
    #[serde(rename = "new-page")]
    NewPage(PageMarker),
    /// Image
    #[serde(rename = "image")]
    Image(ImagePayload),
    /// Chart
    #[serde(rename = "chart")]
    Chart(ChartPayload),
    /// Table
    #[serde(rename = "table")]
    Table(TablePayload),
}

impl BlockContent {
    /// Default (empty) payload for a block kind.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Heading1 => BlockContent::Heading1(TextPayload::default()),
            BlockKind::Heading2 => BlockContent::Heading2(TextPayload::default()),
            BlockKind::Heading3 => BlockContent::Heading3(TextPayload::default()),
            BlockKind::Paragraph => BlockContent::Paragraph(TextPayload::default()),
            BlockKind::BulletList => BlockContent::BulletList(ListPayload::default()),
            BlockKind::NumberedList => BlockContent::NumberedList(ListPayload::default()),
            BlockKind::Quote => BlockContent::Quote(TextPayload::default()),
            BlockKind::Divider => BlockContent::Divider,
            BlockKind::Spacer => BlockContent::Spacer(SpacerPayload::default()),
            BlockKind::PageBreak => BlockContent::PageBreak,
            BlockKind::NewPage => BlockContent::NewPage(PageMarker::default()),
            BlockKind::Image => BlockContent::Image(ImagePayload::default()),
            BlockKind::Chart => BlockContent::Chart(ChartPayload::default()),
            BlockKind::Table => BlockContent::Table(TablePayload::default()),
        }
    }

    /// Create a heading of the given level (clamped to 1-3).
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let payload = TextPayload::new(text);
        match level {
            0 | 1 => BlockContent::Heading1(payload),
            2 => BlockContent::Heading2(payload),
            _ => BlockContent::Heading3(payload),
        }
    }

    /// Create a paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockContent::Paragraph(TextPayload::new(text))
    }

    /// Create a page marker.
    pub fn new_page(title: impl Into<String>, number: u32) -> Self {
        BlockContent::NewPage(PageMarker::new(title, number))
    }

    /// The kind of this content.
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Heading1(_) => BlockKind::Heading1,
            BlockContent::Heading2(_) => BlockKind::Heading2,
            BlockContent::Heading3(_) => BlockKind::Heading3,
            BlockContent::Paragraph(_) => BlockKind::Paragraph,
            BlockContent::BulletList(_) => BlockKind::BulletList,
            BlockContent::NumberedList(_) => BlockKind::NumberedList,
            BlockContent::Quote(_) => BlockKind::Quote,
            BlockContent::Divider => BlockKind::Divider,
            BlockContent::Spacer(_) => BlockKind::Spacer,
            BlockContent::PageBreak => BlockKind::PageBreak,
            BlockContent::NewPage(_) => BlockKind::NewPage,
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::Chart(_) => BlockKind::Chart,
            BlockContent::Table(_) => BlockKind::Table,
        }
    }

    /// Text payload of text-bearing blocks.
    pub fn text(&self) -> Option<&str> {
        match self {
            BlockContent::Heading1(t)
            | BlockContent::Heading2(t)
            | BlockContent::Heading3(t)
            | BlockContent::Paragraph(t)
            | BlockContent::Quote(t) => Some(&t.content),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            BlockContent::Heading1(t)
            | BlockContent::Heading2(t)
            | BlockContent::Heading3(t)
            | BlockContent::Paragraph(t)
            | BlockContent::Quote(t) => t.content.clone(),
            BlockContent::BulletList(l) | BlockContent::NumberedList(l) => l.items.join("\n"),
            BlockContent::NewPage(m) => m.page_title.clone(),
            BlockContent::Image(img) => img
                .caption
                .clone()
                .or_else(|| img.alt.clone())
                .unwrap_or_default(),
            BlockContent::Chart(c) => c.chart_title.clone(),
            BlockContent::Table(t) => t.plain_text(),
            BlockContent::Divider | BlockContent::Spacer(_) | BlockContent::PageBreak => {
                String::new()
            }
        }
    }
}

/// A block in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique id, stable for the block's lifetime
    pub id: BlockId,

    /// Typed payload
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    /// Create a block with a freshly generated id.
    pub fn new(content: BlockContent) -> Self {
        Self::with_id(BlockId::generate(), content)
    }

    /// Create a block with a caller-provided id.
    pub fn with_id(id: impl Into<BlockId>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    /// Create an empty block of the given kind.
    pub fn empty(kind: BlockKind) -> Self {
        Self::new(BlockContent::empty(kind))
    }

    /// Deep copy with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self::new(self.content.clone())
    }

    /// The block kind.
    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Check if this block is a `new-page` marker.
    pub fn is_page_marker(&self) -> bool {
        matches!(self.content, BlockContent::NewPage(_))
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_through_str() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
            assert_eq!(BlockContent::empty(kind).kind(), kind);
        }
        assert!(matches!(
            "video".parse::<BlockKind>(),
            Err(Error::UnknownBlockType(_))
        ));
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block::with_id("b1", BlockContent::new_page("Results", 2));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["id"], "b1");
        assert_eq!(json["type"], "new-page");
        assert_eq!(json["pageTitle"], "Results");
        assert_eq!(json["pageNumber"], 2);

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_unit_variant_json() {
        let block: Block = serde_json::from_str(r#"{"id":"d","type":"divider"}"#).unwrap();
        assert_eq!(block.kind(), BlockKind::Divider);
        assert!(block.plain_text().is_empty());
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let block = Block::new(BlockContent::paragraph("Hello"));
        let copy = block.duplicate();
        assert_ne!(copy.id, block.id);
        assert_eq!(copy.content, block.content);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(BlockContent::heading(1, "a").kind(), BlockKind::Heading1);
        assert_eq!(BlockContent::heading(2, "a").kind(), BlockKind::Heading2);
        assert_eq!(BlockContent::heading(9, "a").kind(), BlockKind::Heading3);
        assert_eq!(BlockKind::Heading2.heading_level(), Some(2));
        assert_eq!(BlockKind::Quote.heading_level(), None);
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let block: Block = serde_json::from_str(r#"{"id":"s","type":"spacer"}"#).unwrap();
        assert_eq!(block.content, BlockContent::Spacer(SpacerPayload { height: 40 }));
    }
}
