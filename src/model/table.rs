//! Table types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A table cell value.
///
/// Untagged so rows serialize as plain JSON arrays like `["Yes", 2, "66.7%"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Text value
    Text(String),
}

impl Cell {
    /// Create a text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.to_string()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        i64::try_from(n).map(Cell::Int).unwrap_or(Cell::Float(n as f64))
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Float(n)
    }
}

/// Header row plus body rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableData {
    /// Column headers
    pub headers: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<Cell>>,
}

impl TableData {
    /// Create a table with the given headers and no rows.
    pub fn with_headers<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Get the header cells.
    pub fn header(&self) -> &[String] {
        &self.headers
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (headers, or widest row without headers).
    pub fn column_count(&self) -> usize {
        if !self.headers.is_empty() {
            return self.headers.len();
        }
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table has no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        if !self.headers.is_empty() {
            lines.push(self.headers.join("\t"));
        }
        for row in &self.rows {
            lines.push(
                row.iter()
                    .map(Cell::plain_text)
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
        }
        lines.join("\n")
    }
}

/// Payload of table blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TablePayload {
    /// Table caption (usually the question text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_title: Option<String>,

    /// Table content
    pub table_data: TableData,
}

impl TablePayload {
    /// Create a table payload.
    pub fn new(table_data: TableData) -> Self {
        Self {
            table_title: None,
            table_data,
        }
    }

    /// Set the caption.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.table_title = Some(title.into());
        self
    }

    /// Get plain text representation (caption line, then the table).
    pub fn plain_text(&self) -> String {
        match &self.table_title {
            Some(title) => format!("{}\n{}", title, self.table_data.plain_text()),
            None => self.table_data.plain_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = TableData::default();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_table_with_data() {
        let mut table = TableData::with_headers(["Name", "Age"]);
        table.add_row(vec!["Alice".into(), Cell::Int(30)]);
        table.add_row(vec!["Bob".into(), Cell::Int(25)]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.plain_text(), "Name\tAge\nAlice\t30\nBob\t25");
    }

    #[test]
    fn test_cell_json_is_untagged() {
        let row = vec![Cell::text("Yes"), Cell::Int(2), Cell::text("66.7%")];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["Yes",2,"66.7%"]"#);

        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_cell_empty() {
        assert!(Cell::text("  ").is_empty());
        assert!(!Cell::Int(0).is_empty());
    }
}
