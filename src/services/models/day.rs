//! Day-trading model: VWAP bias amplified during the active session.

use super::{ScoringContext, Tally, TimeframeModel, Vote, VoteRule};
use crate::types::Timeframe;

/// Most active hours (UTC, inclusive).
pub const SESSION_HOURS: std::ops::RangeInclusive<u32> = 14..=20;
const SESSION_BOOST: f64 = 1.2;

/// Intraday model.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayModel;

const RULES: &[VoteRule] = &[VoteRule {
    name: "vwap",
    weight: 2.0,
    evaluate: vwap_vote,
}];

impl TimeframeModel for DayModel {
    fn timeframe(&self) -> Timeframe {
        Timeframe::Day
    }

    fn rules(&self) -> &'static [VoteRule] {
        RULES
    }

    /// Boost the leading side inside the session, never past the weight the
    /// trailing side leaves free.
    fn adjust(&self, tally: Tally, ctx: &ScoringContext<'_>) -> Tally {
        if !SESSION_HOURS.contains(&ctx.snapshot.session_hour()) {
            return tally;
        }

        if tally.long > tally.short {
            Tally {
                long: (tally.long * SESSION_BOOST).min(tally.total - tally.short),
                ..tally
            }
        } else if tally.short > tally.long {
            Tally {
                short: (tally.short * SESSION_BOOST).min(tally.total - tally.long),
                ..tally
            }
        } else {
            tally
        }
    }
}

fn vwap_vote(ctx: &ScoringContext<'_>) -> Option<Vote> {
    let vwap = ctx.indicators.vwap?;
    Some(if ctx.snapshot.price > vwap {
        Vote::Long(2.0)
    } else {
        Vote::Short(2.0)
    })
}
