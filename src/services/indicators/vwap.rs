//! Volume Weighted Average Price (VWAP) indicator.

use super::Indicator;
use crate::types::OhlcPoint;

/// VWAP (Volume Weighted Average Price) over a rolling window.
///
/// VWAP = Sum(TP * Volume) / Sum(Volume), TP = (High + Low + Close) / 3.
/// Candles without volume count with unit weight.
pub struct Vwap {
    period: usize,
}

impl Default for Vwap {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Vwap {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Vwap {
    type Output = f64;

    fn id(&self) -> &str {
        "vwap"
    }

    fn name(&self) -> &str {
        "VWAP"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<f64> {
        if candles.len() < self.period {
            return None;
        }

        let (cum_tp_vol, cum_vol) = candles[candles.len() - self.period..]
            .iter()
            .fold((0.0, 0.0), |(tp_vol, vol), candle| {
                let v = candle.volume.unwrap_or(1.0);
                (tp_vol + candle.typical_price() * v, vol + v)
            });

        if cum_vol > 0.0 {
            Some(cum_tp_vol / cum_vol)
        } else {
            candles.last().map(|c| c.close)
        }
    }
}
