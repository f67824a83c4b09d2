//! Average Directional Index (ADX) indicator.

use super::Indicator;
use crate::types::{AdxValue, OhlcPoint};

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-40: Trending
/// - Above 40: Strong trend
///
/// Reported together with +DI and -DI for direction.
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Calculate True Range.
    fn true_range(current: &OhlcPoint, previous: &OhlcPoint) -> f64 {
        let hl = current.high - current.low;
        let hc = (current.high - previous.close).abs();
        let lc = (current.low - previous.close).abs();
        hl.max(hc).max(lc)
    }

    /// Calculate smoothed moving average (Wilder's smoothing).
    fn wilders_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let mut smoothed: f64 = values.iter().take(period).sum::<f64>() / period as f64;
        result.push(smoothed);

        for value in values.iter().skip(period) {
            smoothed = (smoothed * (period - 1) as f64 + value) / period as f64;
            result.push(smoothed);
        }

        result
    }

    fn directional_index(dm: f64, atr: f64) -> f64 {
        if atr > 0.0 {
            (dm / atr) * 100.0
        } else {
            0.0
        }
    }
}

impl Indicator for Adx {
    type Output = AdxValue;

    fn id(&self) -> &str {
        "adx"
    }

    fn name(&self) -> &str {
        "ADX"
    }

    fn min_periods(&self) -> usize {
        self.period * 2 + 1
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<AdxValue> {
        if candles.len() < self.min_periods() {
            return None;
        }

        let mut plus_dm = Vec::with_capacity(candles.len() - 1);
        let mut minus_dm = Vec::with_capacity(candles.len() - 1);
        let mut tr = Vec::with_capacity(candles.len() - 1);

        for pair in candles.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            let up_move = current.high - previous.high;
            let down_move = previous.low - current.low;

            plus_dm.push(if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            });
            minus_dm.push(if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            });
            tr.push(Self::true_range(current, previous));
        }

        let smoothed_plus_dm = Self::wilders_smooth(&plus_dm, self.period);
        let smoothed_minus_dm = Self::wilders_smooth(&minus_dm, self.period);
        let smoothed_tr = Self::wilders_smooth(&tr, self.period);

        let dx_values: Vec<f64> = smoothed_tr
            .iter()
            .zip(smoothed_plus_dm.iter().zip(smoothed_minus_dm.iter()))
            .map(|(&atr, (&pdm, &mdm))| {
                let plus_di = Self::directional_index(pdm, atr);
                let minus_di = Self::directional_index(mdm, atr);
                let di_sum = plus_di + minus_di;
                if di_sum > 0.0 {
                    ((plus_di - minus_di).abs() / di_sum) * 100.0
                } else {
                    0.0
                }
            })
            .collect();

        let adx = *Self::wilders_smooth(&dx_values, self.period).last()?;
        let last_atr = *smoothed_tr.last()?;

        Some(AdxValue {
            adx,
            di_plus: Self::directional_index(*smoothed_plus_dm.last()?, last_atr),
            di_minus: Self::directional_index(*smoothed_minus_dm.last()?, last_atr),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::test_support::{candles_from_closes, downtrend, uptrend};

    #[test]
    fn test_adx_min_periods() {
        let adx = Adx::default();
        assert_eq!(adx.min_periods(), 29); // period * 2 + 1
        assert!(adx.calculate(&uptrend(28)).is_none());
        assert!(adx.calculate(&uptrend(29)).is_some());
    }

    #[test]
    fn test_adx_uptrend_direction() {
        let value = Adx::default().calculate(&uptrend(60)).unwrap();
        assert!(value.di_plus > value.di_minus);
        assert!(value.adx > 25.0, "steady uptrend should trend, got {}", value.adx);
    }

    #[test]
    fn test_adx_downtrend_direction() {
        let value = Adx::default().calculate(&downtrend(60)).unwrap();
        assert!(value.di_minus > value.di_plus);
    }

    #[test]
    fn test_adx_flat_series_is_zero() {
        let value = Adx::default()
            .calculate(&candles_from_closes(&[42.0; 40]))
            .unwrap();
        assert_eq!(value.adx, 0.0);
        assert_eq!(value.di_plus, 0.0);
        assert_eq!(value.di_minus, 0.0);
    }

    #[test]
    fn test_adx_value_range() {
        let value = Adx::default().calculate(&uptrend(80)).unwrap();
        assert!((0.0..=100.0).contains(&value.adx));
    }
}
