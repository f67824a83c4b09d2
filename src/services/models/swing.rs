//! Swing model: trend, position within the range, chart patterns.

use super::{ScoringContext, TimeframeModel, Vote, VoteRule};
use crate::types::{PatternBias, Timeframe, Trend};

/// Multi-day model.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingModel;

const RULES: &[VoteRule] = &[
    VoteRule {
        name: "trend",
        weight: 3.0,
        evaluate: trend_vote,
    },
    VoteRule {
        name: "support_resistance",
        weight: 2.0,
        evaluate: levels_vote,
    },
    VoteRule {
        name: "chart_patterns",
        weight: 2.0,
        evaluate: pattern_vote,
    },
];

impl TimeframeModel for SwingModel {
    fn timeframe(&self) -> Timeframe {
        Timeframe::Swing
    }

    fn rules(&self) -> &'static [VoteRule] {
        RULES
    }
}

fn trend_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    Some(match ctx.indicators.trend? {
        Trend::Uptrend => Vote::Long(3.0),
        Trend::Downtrend => Vote::Short(3.0),
        Trend::Sideways => Vote::Neutral,
    })
}

/// Closer to support than to resistance votes long.
///
/// A missing side is treated as support at zero or resistance at infinity.
fn levels_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let levels = &ctx.indicators.levels;
    if levels.is_empty() {
        return None;
    }

    let price = ctx.snapshot.price;
    let support = levels.nearest_support_below(price).unwrap_or(0.0);
    let resistance = levels.nearest_resistance_above(price).unwrap_or(f64::INFINITY);

    Some(if price - support < resistance - price {
        Vote::Long(2.0)
    } else {
        Vote::Short(2.0)
    })
}

/// Summed confidence of bullish against bearish patterns.
fn pattern_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let (bullish, bearish) =
        ctx.patterns
            .iter()
            .fold((0.0, 0.0), |(bull, bear), p| match p.bias {
                PatternBias::Bullish => (bull + p.confidence, bear),
                PatternBias::Bearish => (bull, bear + p.confidence),
                PatternBias::Neutral => (bull, bear),
            });

    if bullish == 0.0 && bearish == 0.0 {
        return None;
    }
    Some(if bullish > bearish {
        Vote::Long(2.0)
    } else if bearish > bullish {
        Vote::Short(2.0)
    } else {
        Vote::Neutral
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::models::test_support::snapshot;
    use crate::types::{IndicatorSet, Pattern, PriceLevels};

    #[test]
    fn test_uptrend_near_support() {
        let indicators = IndicatorSet {
            trend: Some(Trend::Uptrend),
            levels: PriceLevels {
                support: vec![49_500.0],
                resistance: vec![53_000.0],
                ..Default::default()
            },
            ..Default::default()
        };
        let card = SwingModel.score(&snapshot(50_000.0, 2.0), &indicators, &[]);
        assert_eq!(card.long, 100.0);
    }

    #[test]
    fn test_near_resistance_votes_short() {
        let indicators = IndicatorSet {
            trend: Some(Trend::Sideways),
            levels: PriceLevels {
                support: vec![45_000.0],
                resistance: vec![50_500.0],
                ..Default::default()
            },
            ..Default::default()
        };
        let card = SwingModel.score(&snapshot(50_000.0, 2.0), &indicators, &[]);
        // Short 2 of total 5
        assert!((card.short - 40.0).abs() < 1e-9);
        assert_eq!(card.long, 0.0);
    }

    #[test]
    fn test_one_sided_levels_use_defaults() {
        let indicators = IndicatorSet {
            levels: PriceLevels {
                support: vec![49_000.0],
                ..Default::default()
            },
            ..Default::default()
        };
        let card = SwingModel.score(&snapshot(50_000.0, 2.0), &indicators, &[]);
        assert_eq!(card.long, 100.0);
    }

    #[test]
    fn test_pattern_bias_vote() {
        let patterns = vec![
            Pattern::new("Double Bottom", PatternBias::Bullish, 80.0, 10, 30),
            Pattern::new("Shooting Star", PatternBias::Bearish, 70.0, 35, 40),
            Pattern::new("Doji", PatternBias::Neutral, 90.0, 39, 40),
        ];
        let card = SwingModel.score(&snapshot(50_000.0, 2.0), &IndicatorSet::default(), &patterns);
        assert_eq!(card.long, 100.0);

        let neutral_only = vec![Pattern::new("Doji", PatternBias::Neutral, 90.0, 39, 40)];
        let card =
            SwingModel.score(&snapshot(50_000.0, 2.0), &IndicatorSet::default(), &neutral_only);
        assert_eq!((card.long, card.short), (0.0, 0.0));
    }
}
