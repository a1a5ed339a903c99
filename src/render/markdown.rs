//! Markdown rendering for report documents.

use crate::error::Result;
use crate::model::{Block, BlockContent, ChartPayload, Document, Page, TableData};
use crate::paginate::paginate;

use super::RenderOptions;

/// Convert a document to Markdown, page by page.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a single page body to Markdown.
pub fn to_markdown_page(page: &Page, options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    let mut output = String::new();
    renderer.render_page(&mut output, page);
    output.trim().to_string()
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        for page in paginate(&doc.blocks) {
            self.render_page(&mut output, &page);
        }
        Ok(output.trim().to_string())
    }

    fn render_page(&self, output: &mut String, page: &Page) {
        if self.options.include_page_markers {
            output.push_str(&format!("<!-- page {} -->\n\n", page.number));
        }
        for block in page.body() {
            self.render_block(output, block);
        }
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match &block.content {
            BlockContent::Heading1(t) => self.render_heading(output, 1, &t.content),
            BlockContent::Heading2(t) => self.render_heading(output, 2, &t.content),
            BlockContent::Heading3(t) => self.render_heading(output, 3, &t.content),
            BlockContent::Paragraph(t) => {
                if !t.content.trim().is_empty() {
                    output.push_str(&self.escape(&t.content));
                    output.push_str("\n\n");
                }
            }
            BlockContent::Quote(t) => {
                for line in t.content.lines() {
                    output.push_str("> ");
                    output.push_str(&self.escape(line));
                    output.push('\n');
                }
                output.push('\n');
            }
            BlockContent::BulletList(list) => {
                for item in &list.items {
                    output.push(self.options.list_marker);
                    output.push(' ');
                    output.push_str(&self.escape(item));
                    output.push('\n');
                }
                output.push('\n');
            }
            BlockContent::NumberedList(list) => {
                for (i, item) in list.items.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, self.escape(item)));
                }
                output.push('\n');
            }
            BlockContent::Divider => output.push_str("---\n\n"),
            BlockContent::Spacer(_) | BlockContent::PageBreak | BlockContent::NewPage(_) => {
                if !output.is_empty() && !output.ends_with("\n\n") {
                    output.push_str("\n\n");
                }
            }
            BlockContent::Image(img) => {
                let alt = img.alt.as_deref().unwrap_or("");
                output.push_str(&format!("![{}]({})\n\n", alt, img.src));
                if let Some(ref caption) = img.caption {
                    output.push_str(&format!("*{}*\n\n", self.escape(caption)));
                }
            }
            BlockContent::Chart(chart) => self.render_chart(output, chart),
            BlockContent::Table(table) => {
                if let Some(ref title) = table.table_title {
                    output.push_str(&format!("**{}**\n\n", self.escape(title)));
                }
                self.render_table(output, &table.table_data);
            }
        }
    }

    fn render_heading(&self, output: &mut String, level: usize, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        output.push_str(&"#".repeat(level));
        output.push(' ');
        output.push_str(&self.escape(text));
        output.push_str("\n\n");
    }

    fn render_chart(&self, output: &mut String, chart: &ChartPayload) {
        let title = if chart.chart_title.is_empty() {
            "Chart"
        } else {
            chart.chart_title.as_str()
        };
        output.push_str(&format!("**{}** ({} chart)\n\n", self.escape(title), chart.chart_type));

        if self.options.include_chart_data && !chart.is_empty() {
            let mut table = TableData::with_headers(["Response", "Count"]);
            for datum in &chart.chart_data {
                table.add_row(vec![datum.name.clone().into(), datum.value.into()]);
            }
            self.render_table(output, &table);
        }
    }

    fn render_table(&self, output: &mut String, table: &TableData) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        if !table.headers.is_empty() {
            output.push('|');
            for header in &table.headers {
                output.push_str(&format!(" {} |", self.cell_text(header)));
            }
            output.push('\n');
            output.push('|');
            for _ in 0..col_count {
                output.push_str(" --- |");
            }
            output.push('\n');
        }

        for row in &table.rows {
            output.push('|');
            for cell in row {
                output.push_str(&format!(" {} |", self.cell_text(&cell.plain_text())));
            }
            output.push('\n');
        }

        output.push('\n');
    }

    fn cell_text(&self, text: &str) -> String {
        self.escape(text.replace('\n', " ").trim())
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Core formatting, link brackets and table pipes
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
