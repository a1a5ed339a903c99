//! Editor configuration.

use super::history::DEFAULT_HISTORY_CAPACITY;
use crate::model::DEFAULT_TITLE;

/// Options for an editing session.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Maximum number of undo snapshots (including the initial state)
    pub history_capacity: usize,

    /// Title used when the session synthesizes a new document
    pub default_title: String,
}

impl EditorOptions {
    /// Create new editor options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the undo log capacity (minimum 1).
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    /// Set the title for synthesized documents.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = EditorOptions::new()
            .with_history_capacity(0)
            .with_default_title("Survey Summary");
        assert_eq!(options.history_capacity, 1);
        assert_eq!(options.default_title, "Survey Summary");
        assert_eq!(EditorOptions::default().history_capacity, 50);
    }
}
