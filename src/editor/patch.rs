//! Partial payload updates for `update_block`.

use crate::model::{BlockContent, ChartDatum, ChartType, TableData};
use serde::{Deserialize, Serialize};

/// A partial block payload.
///
/// Each set field replaces the matching payload field of the target block.
/// Fields the target variant does not have are ignored, and there is no way
/// to express a change of block type: a JSON `"type"` key is simply dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockPatch {
    /// Text of headings, paragraphs and quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Items of list blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// Chart type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    /// Chart title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_title: Option<String>,
    /// Chart data points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<ChartDatum>>,
    /// Height of charts and spacers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Table caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_title: Option<String>,
    /// Table content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,
    /// Page marker title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    /// Page marker number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Image source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Image alt text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Image caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Image width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl BlockPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set list items.
    pub fn with_items<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Set chart type.
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    /// Set chart title.
    pub fn with_chart_title(mut self, title: impl Into<String>) -> Self {
        self.chart_title = Some(title.into());
        self
    }

    /// Set height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set table content.
    pub fn with_table_data(mut self, table: TableData) -> Self {
        self.table_data = Some(table);
        self
    }

    /// Set page marker title.
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// Set image source.
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the applicable fields into `content`.
    pub fn apply_to(&self, content: &mut BlockContent) {
        match content {
            BlockContent::Heading1(t)
            | BlockContent::Heading2(t)
            | BlockContent::Heading3(t)
            | BlockContent::Paragraph(t)
            | BlockContent::Quote(t) => set(&mut t.content, &self.content),
            BlockContent::BulletList(l) | BlockContent::NumberedList(l) => {
                set(&mut l.items, &self.items)
            }
            BlockContent::Spacer(s) => set(&mut s.height, &self.height),
            BlockContent::NewPage(m) => {
                set(&mut m.page_title, &self.page_title);
                set(&mut m.page_number, &self.page_number);
            }
            BlockContent::Image(img) => {
                set(&mut img.src, &self.src);
                if self.alt.is_some() {
                    img.alt = self.alt.clone();
                }
                if self.caption.is_some() {
                    img.caption = self.caption.clone();
                }
                if self.width.is_some() {
                    img.width = self.width;
                }
            }
            BlockContent::Chart(c) => {
                set(&mut c.chart_type, &self.chart_type);
                set(&mut c.chart_title, &self.chart_title);
                set(&mut c.chart_data, &self.chart_data);
                set(&mut c.height, &self.height);
            }
            BlockContent::Table(t) => {
                if self.table_title.is_some() {
                    t.table_title = self.table_title.clone();
                }
                set(&mut t.table_data, &self.table_data);
            }
            BlockContent::Divider | BlockContent::PageBreak => {}
        }
    }
}

fn set<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *field = v.clone();
    }
}
