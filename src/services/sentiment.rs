//! Market-data sentiment on a -1 (bearish) to 1 (bullish) scale.
//!
//! Only inputs already present in the snapshot and indicator set are used.
//! Social and news sentiment need external feeds and are not scored.

use crate::types::{IndicatorSet, MarketSentiment, MarketSnapshot, MarketStructure};

/// Score sentiment from the computed indicators and price/volume history.
pub fn market_sentiment(snapshot: &MarketSnapshot, indicators: &IndicatorSet) -> MarketSentiment {
    let technical = technical_sentiment(snapshot, indicators);
    let market_metrics = market_metrics_sentiment(snapshot, indicators);
    MarketSentiment {
        technical,
        market_metrics,
        score: ((technical + market_metrics) / 2.0).clamp(-1.0, 1.0),
    }
}

/// RSI bucket, MACD spread and volume against its average.
fn technical_sentiment(snapshot: &MarketSnapshot, indicators: &IndicatorSet) -> f64 {
    let mut factors = Vec::with_capacity(3);

    if let Some(rsi) = indicators.rsi {
        factors.push(if rsi < 30.0 {
            -0.8
        } else if rsi > 70.0 {
            0.8
        } else {
            (rsi - 50.0) / 50.0
        });
    }

    if let Some(macd) = indicators.macd {
        factors.push(((macd.line - macd.signal) / 100.0).tanh());
    }

    let last_volume = snapshot.aligned_volumes().and_then(|v| v.last().copied());
    if let (Some(volume), Some(average)) = (last_volume, indicators.volume_ma) {
        if average > 0.0 {
            factors.push((volume / average - 1.0).tanh());
        }
    }

    mean(&factors)
}

/// Last-bar momentum and the accumulation/distribution phase.
fn market_metrics_sentiment(snapshot: &MarketSnapshot, indicators: &IndicatorSet) -> f64 {
    let mut factors = Vec::with_capacity(2);

    if let [.., previous, last] = snapshot.price_history() {
        if *previous > 0.0 {
            factors.push(((last / previous - 1.0) * 10.0).tanh());
        }
    }

    match indicators.market_structure {
        Some(MarketStructure::Accumulation) => factors.push(1.0),
        Some(MarketStructure::Distribution) => factors.push(-1.0),
        _ => {}
    }

    mean(&factors)
}

fn mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        0.0
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::models::test_support::snapshot;
    use crate::types::MacdValue;

    #[test]
    fn test_no_inputs_is_neutral() {
        let sentiment = market_sentiment(&snapshot(100.0, 1.0), &IndicatorSet::default());
        assert_eq!(sentiment, MarketSentiment::default());
        assert_eq!(sentiment.label(), "Neutral");
    }

    #[test]
    fn test_rsi_buckets() {
        let snap = snapshot(100.0, 1.0);
        let technical = |rsi: f64| {
            let indicators = IndicatorSet {
                rsi: Some(rsi),
                ..Default::default()
            };
            market_sentiment(&snap, &indicators).technical
        };
        assert_eq!(technical(80.0), 0.8);
        assert_eq!(technical(25.0), -0.8);
        assert!((technical(60.0) - 0.2).abs() < 1e-12);
        assert_eq!(technical(50.0), 0.0);
    }

    #[test]
    fn test_technical_averages_macd_and_volume() {
        let snap = snapshot(100.0, 1.0).with_history(vec![99.0, 100.0], Some(vec![1_000.0, 2_000.0]));
        let indicators = IndicatorSet {
            macd: Some(MacdValue {
                line: 150.0,
                signal: 50.0,
                histogram: 100.0,
            }),
            volume_ma: Some(1_000.0),
            ..Default::default()
        };
        let sentiment = market_sentiment(&snap, &indicators);
        assert!((sentiment.technical - 1.0_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_market_metrics_momentum_and_structure() {
        let snap = snapshot(101.0, 1.0).with_history(vec![100.0, 101.0], None);
        let indicators = IndicatorSet {
            market_structure: Some(MarketStructure::Accumulation),
            ..Default::default()
        };
        let sentiment = market_sentiment(&snap, &indicators);
        let momentum = (0.01_f64 * 10.0).tanh();
        assert!((sentiment.market_metrics - (momentum + 1.0) / 2.0).abs() < 1e-12);
        assert!((sentiment.score - sentiment.market_metrics / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bearish_inputs_stay_in_range() {
        let snap = snapshot(80.0, -20.0).with_history(vec![100.0, 80.0], None);
        let indicators = IndicatorSet {
            rsi: Some(10.0),
            macd: Some(MacdValue {
                line: -900.0,
                signal: 0.0,
                histogram: -900.0,
            }),
            market_structure: Some(MarketStructure::Distribution),
            ..Default::default()
        };
        let sentiment = market_sentiment(&snap, &indicators);
        assert!(sentiment.score < -0.2);
        assert!(sentiment.score >= -1.0);
        assert_eq!(sentiment.label(), "Bearish");
    }
}
