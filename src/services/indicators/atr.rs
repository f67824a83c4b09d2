//! Average True Range (ATR) indicator.

use super::Indicator;
use crate::types::OhlcPoint;

/// ATR (Average True Range) indicator.
///
/// True range here is `max(High - Low, |High - PrevClose|)` and the ATR is the
/// plain mean of the trailing `period` true ranges. With fewer true ranges than
/// `period` the mean covers what is available; a single observation yields
/// nothing and callers fall back to a fixed fraction of price.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Calculate True Range.
    pub fn true_range(current: &OhlcPoint, previous: &OhlcPoint) -> f64 {
        let hl = current.high - current.low;
        let hc = (current.high - previous.close).abs();
        hl.max(hc)
    }
}

impl Indicator for Atr {
    type Output = f64;

    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> &str {
        "ATR"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<f64> {
        if candles.len() < self.min_periods() {
            return None;
        }

        let true_ranges: Vec<f64> = candles
            .windows(2)
            .map(|w| Self::true_range(&w[1], &w[0]))
            .collect();

        let start = true_ranges.len().saturating_sub(self.period);
        let window = &true_ranges[start..];
        Some(window.iter().sum::<f64>() / window.len() as f64)
    }
}
