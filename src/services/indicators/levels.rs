//! Support/resistance and swing-point detection.

use crate::config::IndicatorConfig;
use crate::types::PriceLevels;

/// Indices whose value strictly dominates every neighbour within `window`
/// bars on both sides. `higher` selects local maxima, otherwise minima.
///
/// Points closer than `window` to either edge never qualify.
pub fn extrema_indices(values: &[f64], window: usize, higher: bool) -> Vec<usize> {
    if window == 0 || values.len() < 2 * window + 1 {
        return Vec::new();
    }

    (window..values.len() - window)
        .filter(|&i| {
            let v = values[i];
            (i - window..=i + window)
                .filter(|&j| j != i)
                .all(|j| if higher { v > values[j] } else { v < values[j] })
        })
        .collect()
}

/// Swing highs in chronological order.
pub fn swing_highs(values: &[f64], window: usize) -> Vec<f64> {
    extrema_indices(values, window, true)
        .into_iter()
        .map(|i| values[i])
        .collect()
}

/// Swing lows in chronological order.
pub fn swing_lows(values: &[f64], window: usize) -> Vec<f64> {
    extrema_indices(values, window, false)
        .into_iter()
        .map(|i| values[i])
        .collect()
}

/// Support and resistance over the trailing `lookback` bars, ascending and
/// de-duplicated.
pub fn support_resistance(prices: &[f64], lookback: usize, window: usize) -> (Vec<f64>, Vec<f64>) {
    let start = prices.len().saturating_sub(lookback);
    let recent = &prices[start..];
    (
        sorted_levels(swing_lows(recent, window)),
        sorted_levels(swing_highs(recent, window)),
    )
}

fn sorted_levels(mut levels: Vec<f64>) -> Vec<f64> {
    levels.sort_by(|a, b| a.total_cmp(b));
    levels.dedup();
    levels
}

/// Regular levels over the lookback window plus major levels over the full
/// series with the wider window.
pub fn price_levels(prices: &[f64], config: &IndicatorConfig) -> PriceLevels {
    let (support, resistance) =
        support_resistance(prices, config.levels_lookback, config.levels_window);
    let (major_support, major_resistance) =
        support_resistance(prices, prices.len(), config.major_levels_window);

    PriceLevels {
        support,
        resistance,
        major_support,
        major_resistance,
    }
}
