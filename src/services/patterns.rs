//! Candlestick and chart pattern recognition.

use crate::services::indicators::levels::extrema_indices;
use crate::types::{OhlcPoint, Pattern, PatternBias};

/// Bars scanned behind each candlestick.
const CANDLE_WINDOW: usize = 5;
/// Bars on either side of a chart pattern's centre.
const CHART_WINDOW: usize = 20;
/// Neighbours a pivot must strictly dominate.
const PIVOT_WINDOW: usize = 2;
/// Body no larger than this fraction of the close.
const DOJI_BODY_PCT: f64 = 0.001;
/// Relative height difference allowed between matching peaks or troughs.
const PRICE_TOLERANCE: f64 = 0.02;
/// Per-bar relative slope below which a trendline counts as flat.
const SLOPE_TOLERANCE: f64 = 0.001;

const BASE_CONFIDENCE: f64 = 75.0;

#[derive(Debug, Clone, Copy)]
struct Pivot {
    index: usize,
    price: f64,
}

/// Scans a price series for candlestick and chart patterns.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    min_confidence: f64,
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self {
            min_confidence: 65.0,
        }
    }
}

impl PatternRecognizer {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// All patterns at or above the confidence threshold.
    ///
    /// `highs` and `lows` are ignored unless they align with `prices`.
    pub fn identify(&self, prices: &[f64], highs: &[f64], lows: &[f64]) -> Vec<Pattern> {
        let aligned = highs.len() == prices.len() && lows.len() == prices.len();
        let (highs, lows) = if aligned { (highs, lows) } else { (prices, prices) };

        let candles = candles(prices, highs, lows);
        let mut patterns = candlestick_patterns(prices, &candles);
        patterns.extend(chart_patterns(prices, highs, lows));

        patterns.retain(|p| p.confidence >= self.min_confidence);
        patterns
    }
}

fn candles(prices: &[f64], highs: &[f64], lows: &[f64]) -> Vec<OhlcPoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { prices[i - 1] };
            OhlcPoint {
                open,
                high: highs[i].max(open.max(close)),
                low: lows[i].min(open.min(close)),
                close,
                volume: None,
            }
        })
        .collect()
}

/// Baseline confidence reduced by the standard deviation of bar returns
/// (in percent) over `prices[start..=end]`.
fn pattern_confidence(prices: &[f64], start: usize, end: usize) -> f64 {
    let window = &prices[start.min(end)..=end.min(prices.len().saturating_sub(1))];
    let returns: Vec<f64> = window
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect();

    if returns.is_empty() {
        return BASE_CONFIDENCE;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;

    (BASE_CONFIDENCE + 10.0 * (1.0 - variance.sqrt())).clamp(0.0, 100.0)
}

fn candlestick_patterns(prices: &[f64], candles: &[OhlcPoint]) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    for i in CANDLE_WINDOW..candles.len() {
        let candle = &candles[i];
        let prev = &candles[i - 1];
        let start = i - CANDLE_WINDOW;
        let confidence = pattern_confidence(prices, start, i);

        if candle.body() <= DOJI_BODY_PCT * candle.close.abs() {
            patterns.push(Pattern::new("Doji", PatternBias::Neutral, confidence, i - 1, i));
        }

        let body = candle.body();
        let range = candle.range();
        if body > 0.0 && range > 0.0 {
            let prior_decline = prev.close < candles[start].close;
            let prior_rally = prev.close > candles[start].close;

            if candle.lower_shadow() >= 2.0 * body
                && candle.upper_shadow() <= 0.2 * range
                && prior_decline
            {
                patterns.push(Pattern::new("Hammer", PatternBias::Bullish, confidence, start, i));
            }
            if candle.upper_shadow() >= 2.0 * body
                && candle.lower_shadow() <= 0.2 * range
                && prior_rally
            {
                patterns.push(Pattern::new(
                    "Shooting Star",
                    PatternBias::Bearish,
                    confidence,
                    start,
                    i,
                ));
            }
        }

        if prev.body() > 0.0 && candle.body() > prev.body() {
            if prev.is_bearish()
                && candle.is_bullish()
                && candle.open <= prev.close
                && candle.close >= prev.open
            {
                patterns.push(Pattern::new(
                    "Bullish Engulfing",
                    PatternBias::Bullish,
                    confidence,
                    i - 1,
                    i,
                ));
            } else if prev.is_bullish()
                && candle.is_bearish()
                && candle.open >= prev.close
                && candle.close <= prev.open
            {
                patterns.push(Pattern::new(
                    "Bearish Engulfing",
                    PatternBias::Bearish,
                    confidence,
                    i - 1,
                    i,
                ));
            }
        }
    }

    patterns
}

fn pivots(values: &[f64], higher: bool) -> Vec<Pivot> {
    extrema_indices(values, PIVOT_WINDOW, higher)
        .into_iter()
        .map(|index| Pivot {
            index,
            price: values[index],
        })
        .collect()
}

fn similar(a: f64, b: f64) -> bool {
    let avg = (a + b) / 2.0;
    avg > 0.0 && (a - b).abs() / avg <= PRICE_TOLERANCE
}

fn within_chart_window(first: usize, last: usize) -> bool {
    last.saturating_sub(first) <= 2 * CHART_WINDOW
}

fn chart_patterns(prices: &[f64], highs: &[f64], lows: &[f64]) -> Vec<Pattern> {
    let peaks = pivots(highs, true);
    let troughs = pivots(lows, false);
    let mut patterns = Vec::new();

    let mut push = |name: &str, bias: PatternBias, start: usize, end: usize| {
        let confidence = pattern_confidence(prices, start, end);
        patterns.push(Pattern::new(name, bias, confidence, start, end));
    };

    // Head and shoulders: three peaks, the middle one highest
    for w in peaks.windows(3) {
        let (left, head, right) = (w[0], w[1], w[2]);
        if within_chart_window(left.index, right.index)
            && head.price > left.price
            && head.price > right.price
            && similar(left.price, right.price)
            && troughs
                .iter()
                .any(|t| t.index > left.index && t.index < right.index)
        {
            push("Head and Shoulders", PatternBias::Bearish, left.index, right.index);
        }
    }
    for w in troughs.windows(3) {
        let (left, head, right) = (w[0], w[1], w[2]);
        if within_chart_window(left.index, right.index)
            && head.price < left.price
            && head.price < right.price
            && similar(left.price, right.price)
            && peaks
                .iter()
                .any(|p| p.index > left.index && p.index < right.index)
        {
            push(
                "Inverse Head and Shoulders",
                PatternBias::Bullish,
                left.index,
                right.index,
            );
        }
    }

    for w in peaks.windows(2) {
        let (first, second) = (w[0], w[1]);
        if within_chart_window(first.index, second.index)
            && similar(first.price, second.price)
            && troughs
                .iter()
                .any(|t| t.index > first.index && t.index < second.index)
        {
            push("Double Top", PatternBias::Bearish, first.index, second.index);
        }
    }
    for w in troughs.windows(2) {
        let (first, second) = (w[0], w[1]);
        if within_chart_window(first.index, second.index)
            && similar(first.price, second.price)
            && peaks
                .iter()
                .any(|p| p.index > first.index && p.index < second.index)
        {
            push("Double Bottom", PatternBias::Bullish, first.index, second.index);
        }
    }

    // Triangles: overlapping pairs of consecutive peaks and troughs
    for pw in peaks.windows(2) {
        for tw in troughs.windows(2) {
            let (p1, p2, t1, t2) = (pw[0], pw[1], tw[0], tw[1]);
            let start = p1.index.max(t1.index);
            let end = p2.index.min(t2.index);
            let first = p1.index.min(t1.index);
            let last = p2.index.max(t2.index);
            if end <= start || !within_chart_window(first, last) {
                continue;
            }

            let peak_slope = slope(p1, p2);
            let trough_slope = slope(t1, t2);

            if peak_slope.abs() < SLOPE_TOLERANCE && trough_slope > SLOPE_TOLERANCE {
                push("Ascending Triangle", PatternBias::Bullish, first, last);
            } else if trough_slope.abs() < SLOPE_TOLERANCE && peak_slope < -SLOPE_TOLERANCE {
                push("Descending Triangle", PatternBias::Bearish, first, last);
            } else if peak_slope < -SLOPE_TOLERANCE && trough_slope > SLOPE_TOLERANCE {
                push("Symmetrical Triangle", PatternBias::Neutral, first, last);
            }
        }
    }

    patterns
}

/// Relative change per bar between two pivots.
fn slope(a: Pivot, b: Pivot) -> f64 {
    let bars = b.index.saturating_sub(a.index).max(1) as f64;
    if a.price == 0.0 {
        return 0.0;
    }
    (b.price - a.price) / a.price / bars
}
