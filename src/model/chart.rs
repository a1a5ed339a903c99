//! Chart block types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Chart visualization type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Vertical bars
    #[default]
    Bar,
    /// Line series
    Line,
    /// Pie slices
    Pie,
    /// Filled area series
    Area,
}

impl ChartType {
    /// The serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "area" => Ok(ChartType::Area),
            other => Err(Error::Other(format!("Unknown chart type: {}", other))),
        }
    }
}

/// One data point of a chart (category name and its count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    /// Category label
    pub name: String,
    /// Occurrence count
    pub value: u64,
}

impl ChartDatum {
    /// Create a data point.
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Payload of chart blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartPayload {
    /// Visualization type
    pub chart_type: ChartType,
    /// Chart title (usually the question text)
    pub chart_title: String,
    /// Data points in display order
    pub chart_data: Vec<ChartDatum>,
    /// Display height in pixels
    pub height: u32,
}

impl ChartPayload {
    /// Create a chart payload with the default height.
    pub fn new(chart_type: ChartType, title: impl Into<String>, data: Vec<ChartDatum>) -> Self {
        Self {
            chart_type,
            chart_title: title.into(),
            chart_data: data,
            ..Default::default()
        }
    }

    /// Check if the chart has no data points.
    pub fn is_empty(&self) -> bool {
        self.chart_data.is_empty()
    }

    /// Sum of all data point values.
    pub fn total(&self) -> u64 {
        self.chart_data.iter().map(|d| d.value).sum()
    }
}

impl Default for ChartPayload {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Bar,
            chart_title: String::new(),
            chart_data: Vec::new(),
            height: 300,
        }
    }
}
