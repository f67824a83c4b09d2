//! Futures model: momentum, bands, trend strength and volume.

use super::{ScoringContext, TimeframeModel, Vote, VoteRule};
use crate::types::Timeframe;

/// Leveraged short-horizon model.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuturesModel;

const RULES: &[VoteRule] = &[
    VoteRule {
        name: "rsi",
        weight: 3.0,
        evaluate: rsi_vote,
    },
    VoteRule {
        name: "bollinger",
        weight: 3.0,
        evaluate: bollinger_vote,
    },
    VoteRule {
        name: "ema",
        weight: 2.0,
        evaluate: ema_vote,
    },
    VoteRule {
        name: "adx",
        weight: 3.0,
        evaluate: adx_vote,
    },
    VoteRule {
        name: "volume",
        weight: 2.0,
        evaluate: volume_vote,
    },
];

impl TimeframeModel for FuturesModel {
    fn timeframe(&self) -> Timeframe {
        Timeframe::Futures
    }

    fn rules(&self) -> &'static [VoteRule] {
        RULES
    }
}

fn rsi_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let rsi = ctx.indicators.rsi?;
    Some(if rsi < 30.0 {
        Vote::Long(3.0)
    } else if rsi < 40.0 {
        Vote::Long(2.0)
    } else if rsi > 70.0 {
        Vote::Short(3.0)
    } else if rsi > 60.0 {
        Vote::Short(2.0)
    } else {
        Vote::Neutral
    })
}

/// Price within 1% of either band.
fn bollinger_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let bands = ctx.indicators.bollinger?;
    let price = ctx.snapshot.price;
    Some(if price < bands.lower * 1.01 {
        Vote::Long(3.0)
    } else if price > bands.upper * 0.99 {
        Vote::Short(3.0)
    } else {
        Vote::Neutral
    })
}

fn ema_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let ema = ctx.indicators.ema?;
    Some(if ctx.snapshot.price > ema {
        Vote::Long(2.0)
    } else {
        Vote::Short(2.0)
    })
}

/// Only a trending market (ADX above 25) votes.
fn adx_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let adx = ctx.indicators.adx?;
    if adx.adx <= 25.0 {
        return None;
    }
    Some(if adx.di_plus > adx.di_minus {
        Vote::Long(3.0)
    } else {
        Vote::Short(3.0)
    })
}

/// A volume spike above 1.2x its average votes with the last price change.
fn volume_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let volume_ma = ctx.indicators.volume_ma?;
    let current = *ctx.snapshot.aligned_volumes()?.last()?;
    if current <= volume_ma * 1.2 {
        return None;
    }

    let prices = ctx.snapshot.price_history();
    if prices.len() < 2 {
        return None;
    }
    Some(if ctx.snapshot.price > prices[prices.len() - 2] {
        Vote::Long(2.0)
    } else {
        Vote::Short(2.0)
    })
}
