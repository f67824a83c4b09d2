//! Fibonacci retracement levels.

use crate::types::FibonacciLevels;

/// Standard retracement ratios.
pub const RETRACEMENT_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Retracement levels measured down from `swing_high`.
pub fn retracement(swing_high: f64, swing_low: f64) -> Option<FibonacciLevels> {
    if !(swing_high.is_finite() && swing_low.is_finite()) || swing_high <= swing_low {
        return None;
    }

    let span = swing_high - swing_low;
    let levels = RETRACEMENT_RATIOS
        .iter()
        .map(|&ratio| (ratio, swing_high - span * ratio))
        .collect();

    Some(FibonacciLevels {
        swing_high,
        swing_low,
        levels,
    })
}

/// Retracement between the extremes of a series.
pub fn from_series(highs: &[f64], lows: &[f64]) -> Option<FibonacciLevels> {
    let high = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let low = lows.iter().copied().fold(f64::INFINITY, f64::min);
    retracement(high, low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retracement_levels() {
        let fib = retracement(200.0, 100.0).unwrap();
        assert_eq!(fib.levels.len(), 7);
        assert_eq!(fib.levels[0], (0.0, 200.0));
        assert_eq!(fib.levels[3], (0.5, 150.0));
        assert_eq!(fib.levels[6], (1.0, 100.0));
        assert!((fib.levels[4].1 - 138.2).abs() < 1e-9);
    }

    #[test]
    fn test_retracement_rejects_flat_range() {
        assert!(retracement(100.0, 100.0).is_none());
        assert!(from_series(&[], &[]).is_none());
    }

    #[test]
    fn test_from_series_uses_extremes() {
        let fib = from_series(&[10.0, 14.0, 12.0], &[8.0, 9.0, 7.0]).unwrap();
        assert_eq!(fib.swing_high, 14.0);
        assert_eq!(fib.swing_low, 7.0);
    }
}
