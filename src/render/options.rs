//! Rendering options and configuration.

/// Options for rendering report content as text.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit a `<!-- page N -->` comment before each page
    pub include_page_markers: bool,

    /// Character to use for bullet list markers
    pub list_marker: char,

    /// Render chart data points as a table under the chart title
    pub include_chart_data: bool,

    /// Escape special Markdown characters in text
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable page marker comments.
    pub fn with_page_markers(mut self, include: bool) -> Self {
        self.include_page_markers = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable chart data tables.
    pub fn with_chart_data(mut self, include: bool) -> Self {
        self.include_chart_data = include;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_page_markers: true,
            list_marker: '-',
            include_chart_data: true,
            escape_special_chars: true,
        }
    }
}
