//! Simple and exponential moving averages.

use super::Indicator;
use crate::types::OhlcPoint;

/// Mean of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(values[values.len() - period..].iter().sum::<f64>() / period as f64)
}

/// Mean of up to the trailing `period` values (all values when fewer exist).
pub fn trailing_mean(values: &[f64], period: usize) -> Option<f64> {
    if values.is_empty() || period == 0 {
        return None;
    }
    let start = values.len().saturating_sub(period);
    let window = &values[start..];
    Some(window.iter().sum::<f64>() / window.len() as f64)
}

/// EMA series seeded with the SMA of the first `period` values.
///
/// The first element corresponds to index `period - 1` of the input.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = Vec::with_capacity(values.len() - period + 1);

    // First EMA is SMA
    let mut current = values.iter().take(period).sum::<f64>() / period as f64;
    ema.push(current);

    for value in &values[period..] {
        current = (value - current) * multiplier + current;
        ema.push(current);
    }

    ema
}

/// SMA (Simple Moving Average) of closes.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            20 => "sma20",
            50 => "sma50",
            _ => "sma",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            20 => "SMA (20)",
            50 => "SMA (50)",
            _ => "SMA",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<f64> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        sma(&closes, self.period)
    }
}

/// EMA (Exponential Moving Average) of closes.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn id(&self) -> &str {
        "ema"
    }

    fn name(&self) -> &str {
        "EMA"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<f64> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        ema_series(&closes, self.period).last().copied()
    }
}

/// Moving average of traded volume.
pub struct VolumeMa {
    period: usize,
}

impl VolumeMa {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for VolumeMa {
    type Output = f64;

    fn id(&self) -> &str {
        "volume_ma"
    }

    fn name(&self) -> &str {
        "Volume MA"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[OhlcPoint]) -> Option<f64> {
        // Every candle needs a volume for the average to mean anything
        let volumes: Option<Vec<f64>> = candles.iter().map(|c| c.volume).collect();
        sma(&volumes?, self.period)
    }
}
