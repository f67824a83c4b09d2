use serde::{Deserialize, Serialize};

/// Directional bias of a detected pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternBias {
    Bullish,
    Bearish,
    Neutral,
}

/// A candlestick or chart pattern found in the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub name: String,
    #[serde(rename = "type")]
    pub bias: PatternBias,
    /// Confidence in the detection (0-100).
    pub confidence: f64,
    /// First bar of the pattern (index into the price history).
    pub start_idx: usize,
    /// Last bar of the pattern (inclusive).
    pub end_idx: usize,
}

impl Pattern {
    pub fn new(name: &str, bias: PatternBias, confidence: f64, start_idx: usize, end_idx: usize) -> Self {
        Self {
            name: name.to_string(),
            bias,
            confidence,
            start_idx,
            end_idx,
        }
    }
}
