//! Answer histograms and their chart/table projections.

use crate::model::{Cell, ChartDatum, TableData};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column headers of extracted tables.
pub const TABLE_HEADERS: [&str; 3] = ["Response", "Count", "Percentage"];

/// One distinct answer and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramEntry {
    /// Answer label
    pub name: String,
    /// Occurrences
    pub count: u64,
}

impl HistogramEntry {
    /// Create an entry.
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Distinct answer labels with counts, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    entries: Vec<HistogramEntry>,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count labels, keeping the order in which each label first appears.
    pub fn from_labels<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for label in labels {
            *counts.entry(label.into()).or_insert(0) += 1;
        }
        Self {
            entries: counts
                .into_iter()
                .map(|(name, count)| HistogramEntry { name, count })
                .collect(),
        }
    }

    /// Entries in encounter order.
    pub fn entries(&self) -> &[HistogramEntry] {
        &self.entries
    }

    /// Count for a label.
    pub fn count_of(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.count)
    }

    /// Sum of all counts (answers that produced a label).
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count; ties keep encounter order.
    pub fn sorted_by_count(&self) -> Vec<HistogramEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
    }

    /// Chart data points in encounter order.
    pub fn to_chart_data(&self) -> Vec<ChartDatum> {
        self.entries
            .iter()
            .map(|e| ChartDatum::new(e.name.clone(), e.count))
            .collect()
    }

    /// Table of `[label, count, "pct%"]` rows sorted by descending count.
    ///
    /// Percentages are relative to [`Histogram::total`], with one decimal.
    pub fn to_table(&self) -> TableData {
        let total = self.total();
        let mut table = TableData::with_headers(TABLE_HEADERS);
        for entry in self.sorted_by_count() {
            table.add_row(vec![
                Cell::Text(entry.name),
                Cell::from(entry.count),
                Cell::Text(format_percentage(entry.count, total)),
            ]);
        }
        table
    }

    /// Count-weighted statistics over labels that parse as numbers.
    pub fn numeric_summary(&self) -> Option<NumericSummary> {
        let mut count = 0u64;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for entry in &self.entries {
            let Ok(value) = entry.name.trim().parse::<f64>() else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            count += entry.count;
            sum += value * entry.count as f64;
            min = min.min(value);
            max = max.max(value);
        }

        (count > 0).then(|| NumericSummary {
            count,
            mean: sum / count as f64,
            min,
            max,
        })
    }
}

/// Summary of numeric answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of numeric answers
    pub count: u64,
    /// Mean value
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

fn format_percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let pct = count as f64 / total as f64 * 100.0;
    format!("{:.1}%", (pct * 10.0).round() / 10.0)
}
