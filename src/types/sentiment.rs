use serde::{Deserialize, Serialize};

/// Sentiment read from market data alone, each part on a -1 (bearish) to
/// 1 (bullish) scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSentiment {
    /// Mean of the RSI, MACD and volume factors.
    pub technical: f64,
    /// Mean of the momentum and market-structure factors.
    pub market_metrics: f64,
    /// Average of the two parts.
    pub score: f64,
}

impl MarketSentiment {
    pub fn label(&self) -> &'static str {
        if self.score > 0.2 {
            "Bullish"
        } else if self.score < -0.2 {
            "Bearish"
        } else {
            "Neutral"
        }
    }
}
