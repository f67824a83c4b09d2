//! MACD (Moving Average Convergence Divergence) indicator.

use super::moving_average::{ema_series, sma};
use super::Indicator;
use crate::types::{MacdValue, OhlcPoint};

/// MACD indicator.
///
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = SMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// The signal line is a simple average of the MACD line, not an EMA.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period: slow_period.max(fast_period),
            signal_period,
        }
    }

    /// MACD line values, aligned to the slow EMA.
    fn macd_line(&self, closes: &[f64]) -> Vec<f64> {
        let fast_ema = ema_series(closes, self.fast_period);
        let slow_ema = ema_series(closes, self.slow_period);
        if fast_ema.is_empty() || slow_ema.is_empty() {
            return Vec::new();
        }

        // Align the EMAs (fast starts earlier)
        let offset = self.slow_period - self.fast_period;
        fast_ema
            .iter()
            .skip(offset)
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect()
    }
}

impl Indicator for Macd {
    type Output = MacdValue;

    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<MacdValue> {
        if self.fast_period == 0 || self.signal_period == 0 || candles.len() < self.min_periods() {
            return None;
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let macd_line = self.macd_line(&closes);
        let line = *macd_line.last()?;
        let signal = sma(&macd_line, self.signal_period)?;

        Some(MacdValue {
            line,
            signal,
            histogram: line - signal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::test_support::{candles_from_closes, downtrend, uptrend};

    #[test]
    fn test_macd_min_periods() {
        assert_eq!(Macd::default().min_periods(), 34);
        assert!(Macd::default().calculate(&uptrend(33)).is_none());
        assert!(Macd::default().calculate(&uptrend(34)).is_some());
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let macd = Macd::default().calculate(&uptrend(60)).unwrap();
        assert!(macd.line > 0.0);
    }

    #[test]
    fn test_macd_negative_in_downtrend() {
        let macd = Macd::default().calculate(&downtrend(60)).unwrap();
        assert!(macd.line < 0.0);
    }

    #[test]
    fn test_macd_histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 / 6.0).sin() * 8.0)
            .collect();
        let macd = Macd::default()
            .calculate(&candles_from_closes(&closes))
            .unwrap();
        assert!((macd.histogram - (macd.line - macd.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let macd = Macd::default()
            .calculate(&candles_from_closes(&[250.0; 40]))
            .unwrap();
        assert!(macd.line.abs() < 1e-9);
        assert!(macd.signal.abs() < 1e-9);
    }
}
