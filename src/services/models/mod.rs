//! Per-timeframe scoring models.
//!
//! Each model is a table of [`VoteRule`]s. Every rule looks at the snapshot,
//! indicators and patterns and either abstains or casts a vote; the votes are
//! folded into a [`Tally`] and normalised to long/short scores in 0-100.

pub mod day;
pub mod futures;
pub mod position;
pub mod swing;

pub use day::DayModel;
pub use futures::FuturesModel;
pub use position::PositionModel;
pub use swing::SwingModel;

use crate::types::{
    Direction, IndicatorSet, MarketSnapshot, NoSignalReason, Pattern, Timeframe,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Inputs available to every rule.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub snapshot: &'a MarketSnapshot,
    pub indicators: &'a IndicatorSet,
    pub patterns: &'a [Pattern],
}

/// Outcome of a rule that did not abstain.
///
/// Directional votes carry the points awarded, at most the rule's weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vote {
    Long(f64),
    Short(f64),
    /// The rule had data but no opinion; its weight still counts.
    Neutral,
}

/// A named, weighted predicate.
#[derive(Clone, Copy)]
pub struct VoteRule {
    pub name: &'static str,
    /// Weight added to the total whenever the rule votes.
    pub weight: f64,
    /// `None` means abstain: the weight is not counted.
    pub evaluate: fn(&ScoringContext<'_>) -> Option<Vote>,
}

impl std::fmt::Debug for VoteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteRule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Raw weighted votes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub long: f64,
    pub short: f64,
    /// Sum of the weights of every rule that voted.
    pub total: f64,
}

impl Tally {
    /// Add one vote. Points above the weight are capped.
    pub fn record(self, vote: Vote, weight: f64) -> Self {
        let weight = weight.max(0.0);
        match vote {
            Vote::Long(points) => Self {
                long: self.long + points.clamp(0.0, weight),
                total: self.total + weight,
                ..self
            },
            Vote::Short(points) => Self {
                short: self.short + points.clamp(0.0, weight),
                total: self.total + weight,
                ..self
            },
            Vote::Neutral => Self {
                total: self.total + weight,
                ..self
            },
        }
    }

    pub fn fold<I>(votes: I) -> Self
    where
        I: IntoIterator<Item = (Vote, f64)>,
    {
        votes
            .into_iter()
            .fold(Self::default(), |tally, (vote, weight)| tally.record(vote, weight))
    }

    /// Scale to percentages of the total. An empty tally scores zero.
    pub fn normalise(&self) -> ScoreCard {
        if self.total <= 0.0 {
            return ScoreCard::default();
        }
        ScoreCard {
            long: self.long / self.total * 100.0,
            short: self.short / self.total * 100.0,
        }
    }
}

/// Normalised long/short scores (0-100 each, summing to at most 100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub long: f64,
    pub short: f64,
}

impl ScoreCard {
    /// Winning side and its score. Ties go short.
    pub fn leading(&self) -> (Direction, f64) {
        if self.long > self.short {
            (Direction::Long, self.long)
        } else {
            (Direction::Short, self.short)
        }
    }
}

/// Result of the confidence gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Trade { direction: Direction, confidence: f64 },
    NoTrade(NoSignalReason),
}

/// Scoring model for one trading horizon.
pub trait TimeframeModel: Send + Sync {
    fn timeframe(&self) -> Timeframe;

    fn rules(&self) -> &'static [VoteRule];

    /// Hook applied to the raw tally before normalisation.
    fn adjust(&self, tally: Tally, _ctx: &ScoringContext<'_>) -> Tally {
        tally
    }

    fn tally(&self, ctx: &ScoringContext<'_>) -> Tally {
        let votes = self.rules().iter().filter_map(|rule| {
            let vote = (rule.evaluate)(ctx);
            trace!(
                timeframe = %self.timeframe(),
                rule = rule.name,
                ?vote,
                "rule evaluated"
            );
            vote.map(|v| (v, rule.weight))
        });
        self.adjust(Tally::fold(votes), ctx)
    }

    fn score(
        &self,
        snapshot: &MarketSnapshot,
        indicators: &IndicatorSet,
        patterns: &[Pattern],
    ) -> ScoreCard {
        let ctx = ScoringContext {
            snapshot,
            indicators,
            patterns,
        };
        self.tally(&ctx).normalise()
    }

    /// Apply the confidence threshold for this timeframe.
    fn decide(&self, card: &ScoreCard) -> Decision {
        let (direction, confidence) = card.leading();
        let threshold = self.timeframe().params().min_confidence;
        if confidence < threshold {
            Decision::NoTrade(NoSignalReason::LowConfidence {
                confidence,
                threshold,
            })
        } else {
            Decision::Trade {
                direction,
                confidence,
            }
        }
    }
}

static FUTURES: FuturesModel = FuturesModel;
static DAY: DayModel = DayModel;
static SWING: SwingModel = SwingModel;
static POSITION: PositionModel = PositionModel;

/// The scoring model for a timeframe.
pub fn model_for(timeframe: Timeframe) -> &'static dyn TimeframeModel {
    match timeframe {
        Timeframe::Futures => &FUTURES,
        Timeframe::Day => &DAY,
        Timeframe::Swing => &SWING,
        Timeframe::Position => &POSITION,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_fold_counts_neutral_weight() {
        let tally = Tally::fold([
            (Vote::Long(3.0), 3.0),
            (Vote::Short(2.0), 2.0),
            (Vote::Neutral, 3.0),
        ]);
        assert_eq!(tally.long, 3.0);
        assert_eq!(tally.short, 2.0);
        assert_eq!(tally.total, 8.0);
    }

    #[test]
    fn test_tally_caps_points_at_weight() {
        let tally = Tally::default().record(Vote::Long(5.0), 3.0);
        assert_eq!(tally.long, 3.0);
        assert_eq!(tally.total, 3.0);
    }

    #[test]
    fn test_normalise() {
        let card = Tally::fold([(Vote::Long(2.0), 3.0), (Vote::Short(2.0), 2.0)]).normalise();
        assert!((card.long - 40.0).abs() < 1e-9);
        assert!((card.short - 40.0).abs() < 1e-9);
        assert_eq!(Tally::default().normalise(), ScoreCard::default());
    }

    #[test]
    fn test_leading_tie_goes_short() {
        let card = ScoreCard {
            long: 50.0,
            short: 50.0,
        };
        assert_eq!(card.leading(), (Direction::Short, 50.0));
    }

    #[test]
    fn test_decide_applies_threshold() {
        let model = model_for(Timeframe::Day);
        let below = model.decide(&ScoreCard {
            long: 69.9,
            short: 0.0,
        });
        assert!(matches!(
            below,
            Decision::NoTrade(NoSignalReason::LowConfidence { threshold, .. }) if threshold == 70.0
        ));

        let above = model.decide(&ScoreCard {
            long: 10.0,
            short: 80.0,
        });
        assert_eq!(
            above,
            Decision::Trade {
                direction: Direction::Short,
                confidence: 80.0
            }
        );
    }

    #[test]
    fn test_model_for_matches_timeframe() {
        for tf in Timeframe::ALL {
            assert_eq!(model_for(tf).timeframe(), tf);
            assert!(!model_for(tf).rules().is_empty());
        }
    }
}
