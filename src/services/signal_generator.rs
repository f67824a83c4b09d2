//! Turns a scored direction into a concrete trade setup.

use crate::types::{
    risk_reward_ratio, trend_strength, Direction, IndicatorSet, MarketSnapshot, NoSignalReason,
    Signal, Timeframe, TimeframeParams, VolatilityRegime,
};

/// Absorbs float noise when the ratio lands exactly on the minimum.
const RISK_REWARD_TOLERANCE: f64 = 1e-9;

/// Major levels are widened by this fraction before clamping.
const MAJOR_LEVEL_MARGIN: f64 = 0.02;

/// Builds entry, take-profit and stop-loss for one timeframe.
#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator {
    timeframe: Timeframe,
    params: TimeframeParams,
}

impl SignalGenerator {
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            params: timeframe.params(),
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Build a signal, or a `Direction::None` signal when either gate fails.
    pub fn build(
        &self,
        direction: Direction,
        confidence: f64,
        snapshot: &MarketSnapshot,
        indicators: &IndicatorSet,
    ) -> Signal {
        let params = &self.params;
        if direction.is_none() || confidence < params.min_confidence {
            return Signal::none(
                self.timeframe,
                NoSignalReason::LowConfidence {
                    confidence,
                    threshold: params.min_confidence,
                },
                snapshot.change_24h,
            );
        }

        let price = snapshot.price;
        let levels = &indicators.levels;

        let entry = match direction {
            Direction::Long => levels
                .nearest_support_below(price)
                .unwrap_or(price * (1.0 - params.entry_buffer_pct)),
            _ => levels
                .nearest_resistance_above(price)
                .unwrap_or(price * (1.0 + params.entry_buffer_pct)),
        };

        // ATR measured at the current price, scaled to the entry
        let atr = indicators
            .atr
            .unwrap_or(price * params.atr_fallback_pct);
        let offset = atr * entry / price;
        let sign = direction.sign();

        let mut take_profit = entry + sign * params.take_profit_atr * offset;
        let mut stop_loss = entry - sign * params.stop_loss_atr * offset;

        match direction {
            Direction::Long => {
                if let Some(support) = levels.nearest_major_support_below(entry) {
                    stop_loss = stop_loss.max(support * (1.0 - MAJOR_LEVEL_MARGIN));
                }
                if let Some(resistance) = levels.nearest_major_resistance_above(entry) {
                    take_profit = take_profit.min(resistance * (1.0 + MAJOR_LEVEL_MARGIN));
                }
            }
            _ => {
                if let Some(resistance) = levels.nearest_major_resistance_above(entry) {
                    stop_loss = stop_loss.min(resistance * (1.0 + MAJOR_LEVEL_MARGIN));
                }
                if let Some(support) = levels.nearest_major_support_below(entry) {
                    take_profit = take_profit.max(support * (1.0 - MAJOR_LEVEL_MARGIN));
                }
            }
        }

        let ratio = risk_reward_ratio(entry, take_profit, stop_loss);
        let prices_valid = [entry, take_profit, stop_loss]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0);

        if !prices_valid || ratio + RISK_REWARD_TOLERANCE < params.min_risk_reward {
            return Signal::none(
                self.timeframe,
                NoSignalReason::PoorRiskReward {
                    ratio,
                    minimum: params.min_risk_reward,
                },
                snapshot.change_24h,
            );
        }

        Signal {
            timeframe: self.timeframe,
            direction,
            entry_price: entry,
            take_profit,
            stop_loss,
            confidence,
            risk_reward_ratio: ratio,
            trend_strength: trend_strength(snapshot.change_24h),
            volatility_regime: VolatilityRegime::from_change(snapshot.change_24h),
            no_signal_reason: None,
        }
    }
}
