//! Position model: long-term trend, market phase and fundamentals.

use super::{ScoringContext, TimeframeModel, Vote, VoteRule};
use crate::types::{LongTermTrend, MarketStructure, Timeframe};

/// Multi-month model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionModel;

const RULES: &[VoteRule] = &[
    VoteRule {
        name: "long_term_trend",
        weight: 4.0,
        evaluate: long_term_trend_vote,
    },
    VoteRule {
        name: "market_structure",
        weight: 3.0,
        evaluate: structure_vote,
    },
    VoteRule {
        name: "fundamentals",
        weight: 3.0,
        evaluate: fundamental_vote,
    },
];

impl TimeframeModel for PositionModel {
    fn timeframe(&self) -> Timeframe {
        Timeframe::Position
    }

    fn rules(&self) -> &'static [VoteRule] {
        RULES
    }
}

fn long_term_trend_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    Some(match ctx.indicators.long_term_trend? {
        LongTermTrend::Bullish => Vote::Long(4.0),
        LongTermTrend::Bearish => Vote::Short(4.0),
        LongTermTrend::Neutral => Vote::Neutral,
    })
}

fn structure_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    Some(match ctx.indicators.market_structure? {
        MarketStructure::Accumulation => Vote::Long(3.0),
        MarketStructure::Distribution => Vote::Short(3.0),
        _ => Vote::Neutral,
    })
}

fn fundamental_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let score = ctx.snapshot.fundamental_score?;
    Some(if score > 70.0 {
        Vote::Long(3.0)
    } else if score < 30.0 {
        Vote::Short(3.0)
    } else {
        Vote::Neutral
    })
}
