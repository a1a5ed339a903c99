//! Reference renderers for exporting report content as text.

mod markdown;
mod options;
mod text;

pub use markdown::{to_markdown, to_markdown_page, MarkdownRenderer};
pub use options::RenderOptions;
pub use text::to_text;
