use serde::{Deserialize, Serialize};

/// OHLC (Open, High, Low, Close) data point.
///
/// Built from the aligned historical arrays of a [`MarketSnapshot`](super::MarketSnapshot).
/// When the feed only supplies closes, `open` is the previous close and the
/// high/low span both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl OhlcPoint {
    /// Candle body size (absolute).
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-low range.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Typical price used by VWAP.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Extract closing prices from a candle slice.
pub fn closes(candles: &[OhlcPoint]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
