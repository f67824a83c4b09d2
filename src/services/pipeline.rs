//! One analysis pass: indicators, patterns, scoring, signal, risk.

use super::indicators::IndicatorEngine;
use super::models::{model_for, Decision};
use super::patterns::PatternRecognizer;
use super::risk::RiskManager;
use super::sentiment::market_sentiment;
use super::signal_generator::SignalGenerator;
use crate::config::Config;
use crate::error::Result;
use crate::types::{
    AnalysisReport, IndicatorSet, MarketSnapshot, Pattern, RiskAssessment, Signal, Timeframe,
};
use tracing::debug;

/// Stateless analysis chain shared by every timeframe.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    engine: IndicatorEngine,
    recognizer: PatternRecognizer,
    risk: RiskManager,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AnalysisPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: IndicatorEngine::new(config.indicators.clone()),
            recognizer: PatternRecognizer::new(config.min_pattern_confidence),
            risk: RiskManager::new(config.risk.clone()),
        }
    }

    pub fn indicators(&self, snapshot: &MarketSnapshot) -> IndicatorSet {
        self.engine.compute_all(snapshot)
    }

    pub fn patterns(&self, snapshot: &MarketSnapshot) -> Vec<Pattern> {
        let prices = snapshot.price_history();
        self.recognizer.identify(
            prices,
            snapshot.aligned_highs().unwrap_or(prices),
            snapshot.aligned_lows().unwrap_or(prices),
        )
    }

    /// Validate the snapshot and analyse a single timeframe.
    pub fn run(&self, snapshot: &MarketSnapshot, timeframe: Timeframe) -> Result<AnalysisReport> {
        snapshot.validate()?;
        let indicators = self.indicators(snapshot);
        let patterns = self.patterns(snapshot);
        Ok(self.run_with_indicators(snapshot, timeframe, indicators, patterns))
    }

    /// Analyse every timeframe against one validated snapshot.
    ///
    /// Indicators and patterns are computed once and shared.
    pub fn run_all(&self, snapshot: &MarketSnapshot) -> Result<Vec<AnalysisReport>> {
        snapshot.validate()?;
        let indicators = self.indicators(snapshot);
        let patterns = self.patterns(snapshot);
        debug!(
            "Computed indicators {:?} and {} patterns",
            indicators.available(),
            patterns.len()
        );

        Ok(Timeframe::ALL
            .iter()
            .map(|&tf| {
                self.run_with_indicators(snapshot, tf, indicators.clone(), patterns.clone())
            })
            .collect())
    }

    /// Score, build and assess with precomputed inputs. The snapshot is
    /// assumed valid.
    pub fn run_with_indicators(
        &self,
        snapshot: &MarketSnapshot,
        timeframe: Timeframe,
        indicators: IndicatorSet,
        patterns: Vec<Pattern>,
    ) -> AnalysisReport {
        let model = model_for(timeframe);
        let card = model.score(snapshot, &indicators, &patterns);
        debug!(
            "{} scored long {:.1} / short {:.1}",
            timeframe, card.long, card.short
        );

        let (signal, risk) = match model.decide(&card) {
            Decision::NoTrade(reason) => {
                debug!("{} no signal: {}", timeframe, reason);
                (
                    Signal::none(timeframe, reason, snapshot.change_24h),
                    RiskAssessment::no_trade(),
                )
            }
            Decision::Trade {
                direction,
                confidence,
            } => {
                let signal = SignalGenerator::new(timeframe).build(
                    direction,
                    confidence,
                    snapshot,
                    &indicators,
                );
                match signal.no_signal_reason {
                    Some(reason) => {
                        debug!("{} signal rejected: {}", timeframe, reason);
                        (signal, RiskAssessment::no_trade())
                    }
                    None => {
                        debug!(
                            "{} {} signal built at {:.2}",
                            timeframe,
                            signal.direction.label(),
                            signal.entry_price
                        );
                        let risk = self.risk.assess(&signal, timeframe);
                        debug!(
                            "{} risk score {} with {}x leverage",
                            timeframe, risk.risk_score, risk.recommended_leverage
                        );
                        (signal, risk)
                    }
                }
            }
        };

        let sentiment = market_sentiment(snapshot, &indicators);

        AnalysisReport {
            timeframe,
            snapshot: snapshot.clone(),
            indicators,
            patterns,
            sentiment,
            long_score: card.long,
            short_score: card.short,
            signal,
            risk,
            direction_changed: false,
        }
    }
}
