//! Trend and market-structure classification.

use super::levels::{swing_highs, swing_lows};
use super::moving_average::{sma, trailing_mean};
use crate::types::{LongTermTrend, MarketStructure, Trend};

/// Bars needed for the SMA20/SMA50 trend.
pub const TREND_MIN_BARS: usize = 50;
/// Bars needed for the long-term trend and market structure.
pub const STRUCTURE_MIN_BARS: usize = 90;

const SWING_WINDOW: usize = 5;

/// Volume regime of the last 30 bars against the 60 before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Ordering of the most recent swing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStructure {
    HigherHighs,
    HigherLows,
    LowerHighs,
    LowerLows,
}

/// Price vs SMA20 vs SMA50.
pub fn trend(prices: &[f64]) -> Option<Trend> {
    if prices.len() < TREND_MIN_BARS {
        return None;
    }
    let price = *prices.last()?;
    let sma_20 = sma(prices, 20)?;
    let sma_50 = sma(prices, 50)?;

    Some(if price > sma_20 && sma_20 > sma_50 {
        Trend::Uptrend
    } else if price < sma_20 && sma_20 < sma_50 {
        Trend::Downtrend
    } else {
        Trend::Sideways
    })
}

/// Price vs MA50 vs MA200. MA200 covers every bar when fewer than 200 exist.
pub fn long_term_trend(prices: &[f64]) -> Option<LongTermTrend> {
    if prices.len() < STRUCTURE_MIN_BARS {
        return None;
    }
    let price = *prices.last()?;
    let ma_50 = trailing_mean(prices, 50)?;
    let ma_200 = trailing_mean(prices, 200)?;

    Some(if price > ma_50 && ma_50 > ma_200 {
        LongTermTrend::Bullish
    } else if price < ma_50 && ma_50 < ma_200 {
        LongTermTrend::Bearish
    } else {
        LongTermTrend::Neutral
    })
}

pub fn volume_trend(volumes: &[f64]) -> Option<VolumeTrend> {
    if volumes.len() < STRUCTURE_MIN_BARS {
        return None;
    }
    let n = volumes.len();
    let recent = volumes[n - 30..].iter().sum::<f64>() / 30.0;
    let previous = volumes[n - 90..n - 30].iter().sum::<f64>() / 60.0;

    Some(if recent > previous * 1.1 {
        VolumeTrend::Increasing
    } else if recent < previous * 0.9 {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Stable
    })
}

/// Classify the last three swing highs and lows of the trailing 90 bars.
pub fn price_structure(highs: &[f64], lows: &[f64]) -> Option<PriceStructure> {
    if highs.len() < STRUCTURE_MIN_BARS || lows.len() < STRUCTURE_MIN_BARS {
        return None;
    }
    let recent_highs = last_three(swing_highs(&highs[highs.len() - 90..], SWING_WINDOW));
    let recent_lows = last_three(swing_lows(&lows[lows.len() - 90..], SWING_WINDOW));

    if recent_highs.len() < 2 || recent_lows.len() < 2 {
        return None;
    }

    let rising = |v: &[f64]| v.windows(2).all(|w| w[1] > w[0]);
    let falling = |v: &[f64]| v.windows(2).all(|w| w[1] < w[0]);

    if rising(&recent_highs) {
        Some(PriceStructure::HigherHighs)
    } else if rising(&recent_lows) {
        Some(PriceStructure::HigherLows)
    } else if falling(&recent_highs) {
        Some(PriceStructure::LowerHighs)
    } else if falling(&recent_lows) {
        Some(PriceStructure::LowerLows)
    } else {
        None
    }
}

fn last_three(mut points: Vec<f64>) -> Vec<f64> {
    let start = points.len().saturating_sub(3);
    points.drain(..start);
    points
}

/// Market phase from the long-term trend, volume trend and swing structure.
///
/// Returns `None` when any of the four series is shorter than 90 bars.
pub fn market_structure(
    prices: &[f64],
    volumes: &[f64],
    highs: &[f64],
    lows: &[f64],
) -> Option<MarketStructure> {
    let trend = long_term_trend(prices)?;
    let volume = volume_trend(volumes)?;
    if highs.len() < STRUCTURE_MIN_BARS || lows.len() < STRUCTURE_MIN_BARS {
        return None;
    }
    let structure = price_structure(highs, lows);

    Some(match (trend, volume) {
        (LongTermTrend::Bullish, VolumeTrend::Increasing) => {
            if structure == Some(PriceStructure::HigherLows) {
                MarketStructure::Accumulation
            } else {
                MarketStructure::Markup
            }
        }
        (LongTermTrend::Bearish, VolumeTrend::Decreasing) => {
            if structure == Some(PriceStructure::LowerHighs) {
                MarketStructure::Distribution
            } else {
                MarketStructure::Markdown
            }
        }
        _ => MarketStructure::Consolidation,
    })
}
