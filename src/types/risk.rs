use serde::{Deserialize, Serialize};

/// Risk profile of a signal for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Overall risk score, 1 (low) to 10 (high).
    pub risk_score: f64,
    /// Recommended position size as a percentage of the account.
    pub max_position_size_pct: f64,
    /// Leverage ceiling, at least 1.
    pub recommended_leverage: u32,
    pub stop_loss_price: f64,
    /// Only present when leverage > 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidation_price: Option<f64>,
    pub risk_reward_ratio: f64,
    /// Leveraged loss at the stop, in percent.
    pub max_drawdown_pct: f64,
    /// Leveraged gain at the target, in percent.
    pub potential_profit_pct: f64,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Assessment used when there is nothing to trade.
    pub fn no_trade() -> Self {
        Self {
            risk_score: 10.0,
            max_position_size_pct: 0.0,
            recommended_leverage: 1,
            stop_loss_price: 0.0,
            liquidation_price: None,
            risk_reward_ratio: 0.0,
            max_drawdown_pct: 0.0,
            potential_profit_pct: 0.0,
            recommendations: vec![
                "Unable to generate recommendations due to insufficient data".to_string(),
            ],
        }
    }
}
