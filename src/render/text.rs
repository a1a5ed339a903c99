//! Plain text rendering for report documents.

use crate::error::Result;
use crate::model::Document;
use crate::paginate::paginate;

/// Convert a document to plain text, pages separated by a form feed.
pub fn to_text(doc: &Document) -> Result<String> {
    let output = paginate(&doc.blocks)
        .iter()
        .map(|page| page.plain_text())
        .collect::<Vec<_>>()
        .join("\n\n\u{000C}\n\n");

    Ok(output.trim().to_string())
}
