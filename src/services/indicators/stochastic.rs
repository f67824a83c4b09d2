//! Stochastic Oscillator indicator.

use super::Indicator;
use crate::types::{OhlcPoint, StochasticValue};

/// Stochastic Oscillator.
///
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100,
/// %D = SMA of %K.
///
/// - Below 20: Oversold
/// - Above 80: Overbought
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self {
            k_period: k_period.max(1),
            d_period: d_period.max(1),
        }
    }
}

impl Indicator for Stochastic {
    type Output = StochasticValue;

    fn id(&self) -> &str {
        "stochastic"
    }

    fn name(&self) -> &str {
        "Stochastic"
    }

    fn min_periods(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<StochasticValue> {
        if candles.len() < self.min_periods() {
            return None;
        }

        let k_values: Vec<f64> = candles
            .windows(self.k_period)
            .map(|window| {
                let lowest_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                let highest_high = window
                    .iter()
                    .map(|c| c.high)
                    .fold(f64::NEG_INFINITY, f64::max);
                let current_close = window[window.len() - 1].close;

                if highest_high > lowest_low {
                    ((current_close - lowest_low) / (highest_high - lowest_low)) * 100.0
                } else {
                    50.0
                }
            })
            .collect();

        let k = *k_values.last()?;
        let recent = &k_values[k_values.len().saturating_sub(self.d_period)..];
        let d = recent.iter().sum::<f64>() / recent.len() as f64;

        Some(StochasticValue { k, d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::test_support::{candles_from_closes, downtrend, uptrend};

    #[test]
    fn test_stochastic_min_periods() {
        let stoch = Stochastic::default();
        assert_eq!(stoch.min_periods(), 16);
        assert!(stoch.calculate(&uptrend(15)).is_none());
    }

    #[test]
    fn test_stochastic_uptrend_high_k() {
        let value = Stochastic::default().calculate(&uptrend(30)).unwrap();
        assert!(value.k > 80.0, "%K in uptrend should be > 80, got {}", value.k);
    }

    #[test]
    fn test_stochastic_downtrend_low_k() {
        let value = Stochastic::default().calculate(&downtrend(30)).unwrap();
        assert!(value.k < 20.0);
    }

    #[test]
    fn test_stochastic_flat_is_midpoint() {
        let value = Stochastic::default()
            .calculate(&candles_from_closes(&[5.0; 20]))
            .unwrap();
        assert_eq!(value.k, 50.0);
        assert_eq!(value.d, 50.0);
    }

    #[test]
    fn test_stochastic_value_range() {
        let closes: Vec<f64> = (0..40).map(|i| 50.0 + (i as f64).cos() * 3.0).collect();
        let value = Stochastic::default()
            .calculate(&candles_from_closes(&closes))
            .unwrap();
        assert!((0.0..=100.0).contains(&value.k));
        assert!((0.0..=100.0).contains(&value.d));
    }
}
