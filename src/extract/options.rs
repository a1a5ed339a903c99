//! Extraction options.

/// Options for building histograms from response corpora.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Resolve answers in parallel for large scopes
    pub parallel: bool,

    /// Minimum number of records before going parallel
    pub parallel_threshold: usize,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a scope of `records` records should be resolved in parallel.
    pub fn use_parallel(&self, records: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && records >= self.parallel_threshold
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_never_parallel() {
        let options = ExtractOptions::new().sequential();
        assert!(!options.use_parallel(1_000_000));
        assert!(!ExtractOptions::default().use_parallel(10));
    }
}
