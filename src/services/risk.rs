//! Position sizing, leverage and recommendations for a built signal.

use super::report::format_usd;
use crate::config::RiskConfig;
use crate::types::{
    risk_reward_ratio, Direction, RiskAssessment, Signal, Timeframe, VolatilityRegime,
};

/// Derives a bounded risk assessment from a signal.
#[derive(Debug, Clone, Default)]
pub struct RiskManager {
    config: RiskConfig,
}

impl RiskManager {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Assess a signal. A `Direction::None` signal gets the no-trade default.
    pub fn assess(&self, signal: &Signal, timeframe: Timeframe) -> RiskAssessment {
        if signal.direction.is_none() || signal.entry_price <= 0.0 {
            return RiskAssessment::no_trade();
        }

        let risk_score = self.risk_score(signal, timeframe);
        let position_size = self.position_size(risk_score);
        let leverage = leverage(signal, timeframe);
        let lev = f64::from(leverage);

        let liquidation_price = (leverage > 1).then(|| match signal.direction {
            Direction::Short => signal.entry_price * (1.0 + 1.0 / lev),
            _ => signal.entry_price * (1.0 - 1.0 / lev),
        });

        RiskAssessment {
            risk_score,
            max_position_size_pct: position_size,
            recommended_leverage: leverage,
            stop_loss_price: signal.stop_loss,
            liquidation_price,
            risk_reward_ratio: risk_reward_ratio(
                signal.entry_price,
                signal.take_profit,
                signal.stop_loss,
            ),
            max_drawdown_pct: signal.stop_move_pct() * lev,
            potential_profit_pct: signal.target_move_pct() * lev,
            recommendations: recommendations(signal, timeframe, risk_score, position_size, leverage),
        }
    }

    /// 1 (low) to 10 (high).
    pub fn risk_score(&self, signal: &Signal, timeframe: Timeframe) -> f64 {
        let mut score = 5.0 + (100.0 - signal.confidence) / 20.0;

        let ratio = risk_reward_ratio(signal.entry_price, signal.take_profit, signal.stop_loss);
        let comfortable = timeframe.params().min_risk_reward * 1.5;
        if ratio < comfortable {
            score += 1.0;
        } else if ratio > comfortable {
            score -= 1.0;
        }

        match signal.volatility_regime {
            VolatilityRegime::HighlyVolatile => score += 2.0,
            VolatilityRegime::Stable => score -= 1.0,
            _ => {}
        }

        score.clamp(1.0, 10.0)
    }

    /// Percent of the account, capped at the total account risk.
    pub fn position_size(&self, risk_score: f64) -> f64 {
        let base = self.config.max_risk_per_trade * 100.0;
        let size = base * (10.0 - risk_score) / 10.0;
        let rounded = (size * 100.0).round() / 100.0;
        let cap = self.config.max_account_risk * 100.0;
        // Invalid limits size to zero
        if !rounded.is_finite() || !cap.is_finite() {
            return 0.0;
        }
        rounded.min(cap).max(0.0)
    }
}

/// Timeframe cap reduced for volatility and weak trends.
fn leverage(signal: &Signal, timeframe: Timeframe) -> u32 {
    let cap = timeframe.params().max_leverage.max(1);

    let volatility_factor = match signal.volatility_regime {
        VolatilityRegime::HighlyVolatile => 0.5,
        VolatilityRegime::Volatile => 0.75,
        _ => 1.0,
    };
    let trend_factor = if signal.trend_strength < 0.3 {
        0.5 + signal.trend_strength / 0.6
    } else {
        1.0
    };

    let raw = (f64::from(cap) * volatility_factor * trend_factor).floor();
    (raw.max(1.0) as u32).clamp(1, cap)
}

fn recommendations(
    signal: &Signal,
    timeframe: Timeframe,
    risk_score: f64,
    position_size: f64,
    leverage: u32,
) -> Vec<String> {
    let mut recs = vec![
        format!(
            "Recommended {} entry near {}",
            signal.direction.label(),
            format_usd(signal.entry_price)
        ),
        format!("Use maximum position size of {:.2}% of account", position_size),
        format!("Recommended leverage: {}x", leverage),
    ];
    if risk_score > 7.0 {
        recs.push("Consider reducing leverage due to high risk".to_string());
    }
    recs.push(format!("Place stop loss at {}", format_usd(signal.stop_loss)));
    recs.push(format!(
        "Set take profit target at {}",
        format_usd(signal.take_profit)
    ));

    let guidance: [&str; 2] = match timeframe {
        Timeframe::Futures => ["Monitor funding rates", "Consider using trailing stops"],
        Timeframe::Day => [
            "Close position before the session ends",
            "Monitor intraday support/resistance levels",
        ],
        Timeframe::Swing => [
            "Consider scaling in/out of position",
            "Confirm on the daily and 4h timeframes",
        ],
        Timeframe::Position => [
            "Monitor weekly and monthly trends",
            "Consider dollar-cost averaging",
        ],
    };
    recs.extend(guidance.iter().map(|s| s.to_string()));
    recs
}
