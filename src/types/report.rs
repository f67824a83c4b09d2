use super::{
    IndicatorSet, MarketSentiment, MarketSnapshot, Pattern, RiskAssessment, Signal, Timeframe,
};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer needs for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub timeframe: Timeframe,
    pub snapshot: MarketSnapshot,
    pub indicators: IndicatorSet,
    pub patterns: Vec<Pattern>,
    #[serde(default)]
    pub sentiment: MarketSentiment,
    /// Normalized long evidence (0-100).
    pub long_score: f64,
    /// Normalized short evidence (0-100).
    pub short_score: f64,
    pub signal: Signal,
    pub risk: RiskAssessment,
    /// Set by the runner when the direction differs from the previous cycle.
    #[serde(default)]
    pub direction_changed: bool,
}

impl AnalysisReport {
    pub fn has_signal(&self) -> bool {
        self.signal.is_actionable()
    }
}
