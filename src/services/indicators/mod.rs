//! Technical indicator implementations.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod engine;
pub mod fibonacci;
pub mod levels;
pub mod macd;
pub mod moving_average;
pub mod pivots;
pub mod rsi;
pub mod stochastic;
pub mod structure;
pub mod vwap;

pub use adx::Adx;
pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use engine::IndicatorEngine;
pub use macd::Macd;
pub use moving_average::{Ema, Sma, VolumeMa};
pub use rsi::Rsi;
pub use stochastic::Stochastic;
pub use vwap::Vwap;

use crate::types::OhlcPoint;

/// Trait for all candle-based indicators.
pub trait Indicator: Send + Sync {
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Minimum number of candle periods required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator from OHLC candle data.
    /// Returns None if insufficient data.
    fn calculate(&self, candles: &[OhlcPoint]) -> Option<Self::Output>;
}
