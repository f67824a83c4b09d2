use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading horizon for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// Leveraged perpetual/futures trading, minutes to hours.
    Futures,
    /// Intraday: closed before the session ends.
    Day,
    /// Days to weeks.
    Swing,
    /// Weeks to months.
    Position,
}

/// Fixed per-timeframe constants used across the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeframeParams {
    /// Minimum model confidence (0-100) for a signal to be built.
    pub min_confidence: f64,
    /// Minimum reward/risk ratio for a built signal to survive.
    pub min_risk_reward: f64,
    /// Entry buffer from the current price when no level is available (fraction).
    pub entry_buffer_pct: f64,
    /// ATR multiple for the take-profit distance.
    pub take_profit_atr: f64,
    /// ATR multiple for the stop-loss distance.
    pub stop_loss_atr: f64,
    /// ATR fallback as a fraction of price when history is too short.
    pub atr_fallback_pct: f64,
    /// Absolute leverage cap.
    pub max_leverage: u32,
}

impl Timeframe {
    /// All timeframes in evaluation order.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Futures,
        Timeframe::Day,
        Timeframe::Swing,
        Timeframe::Position,
    ];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "futures" | "perp" | "perpetual" => Some(Self::Futures),
            "day" | "day_trading" | "intraday" => Some(Self::Day),
            "swing" | "swing_trading" => Some(Self::Swing),
            "position" | "position_trading" | "long_term" => Some(Self::Position),
            _ => None,
        }
    }

    /// Short identifier used as a tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Futures => "futures",
            Self::Day => "day",
            Self::Swing => "swing",
            Self::Position => "position",
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Futures => "Futures Trading",
            Self::Day => "Day Trading",
            Self::Swing => "Swing Trading",
            Self::Position => "Position Trading",
        }
    }

    pub fn params(&self) -> TimeframeParams {
        match self {
            Self::Futures => TimeframeParams {
                min_confidence: 65.0,
                min_risk_reward: 2.0,
                entry_buffer_pct: 0.01,
                take_profit_atr: 3.0,
                stop_loss_atr: 1.5,
                atr_fallback_pct: 0.02,
                max_leverage: 10,
            },
            Self::Day => TimeframeParams {
                min_confidence: 70.0,
                min_risk_reward: 1.5,
                entry_buffer_pct: 0.001,
                take_profit_atr: 2.0,
                stop_loss_atr: 1.0,
                atr_fallback_pct: 0.01,
                max_leverage: 5,
            },
            Self::Swing => TimeframeParams {
                min_confidence: 65.0,
                min_risk_reward: 2.0,
                entry_buffer_pct: 0.005,
                take_profit_atr: 4.0,
                stop_loss_atr: 2.0,
                atr_fallback_pct: 0.02,
                max_leverage: 3,
            },
            Self::Position => TimeframeParams {
                min_confidence: 75.0,
                min_risk_reward: 3.0,
                entry_buffer_pct: 0.02,
                take_profit_atr: 8.0,
                stop_loss_atr: 3.0,
                atr_fallback_pct: 0.03,
                max_leverage: 2,
            },
        }
    }

    /// Expected holding period, for display.
    pub fn holding_period(&self) -> &'static str {
        match self {
            Self::Futures => "minutes to hours",
            Self::Day => "intraday (max 6h)",
            Self::Swing => "3-10 days",
            Self::Position => "1-6 months",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Long,
    Short,
    None,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
            Direction::None => "NONE",
        }
    }

    /// +1 for long, -1 for short, 0 for none.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
            Direction::None => 0.0,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Direction::None)
    }
}

/// Volatility regime derived from the 24h change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityRegime {
    Stable,
    Moderate,
    Volatile,
    HighlyVolatile,
}

impl VolatilityRegime {
    /// Classify from the absolute 24h change in percent.
    pub fn from_change(change_24h: f64) -> Self {
        let change = change_24h.abs();
        if change > 10.0 {
            Self::HighlyVolatile
        } else if change > 5.0 {
            Self::Volatile
        } else if change > 2.0 {
            Self::Moderate
        } else {
            Self::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Moderate => "Moderate",
            Self::Volatile => "Volatile",
            Self::HighlyVolatile => "Highly Volatile",
        }
    }
}

/// Trend strength (0-1) derived from the 24h change.
pub fn trend_strength(change_24h: f64) -> f64 {
    (change_24h.abs() / 10.0).min(1.0)
}

/// Why a timeframe produced no signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoSignalReason {
    /// Model confidence below the timeframe threshold.
    LowConfidence { confidence: f64, threshold: f64 },
    /// Reward/risk below the timeframe minimum.
    PoorRiskReward { ratio: f64, minimum: f64 },
}

impl fmt::Display for NoSignalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowConfidence {
                confidence,
                threshold,
            } => write!(
                f,
                "confidence {:.1}% below threshold {:.0}%",
                confidence, threshold
            ),
            Self::PoorRiskReward { ratio, minimum } => write!(
                f,
                "risk/reward {:.2} below minimum {:.2}",
                ratio, minimum
            ),
        }
    }
}

/// Reward/risk ratio of a trade setup.
///
/// Returns 0.0 when the stop sits on the entry.
pub fn risk_reward_ratio(entry: f64, take_profit: f64, stop_loss: f64) -> f64 {
    let risk = (entry - stop_loss).abs();
    if risk > 0.0 {
        (take_profit - entry).abs() / risk
    } else {
        0.0
    }
}

/// A concrete trade setup for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub timeframe: Timeframe,
    pub direction: Direction,
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    /// Model confidence (0-100).
    pub confidence: f64,
    pub risk_reward_ratio: f64,
    /// Trend strength (0-1).
    pub trend_strength: f64,
    pub volatility_regime: VolatilityRegime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_signal_reason: Option<NoSignalReason>,
}

impl Signal {
    /// A "no trade" signal: all prices zero.
    pub fn none(timeframe: Timeframe, reason: NoSignalReason, change_24h: f64) -> Self {
        let confidence = match reason {
            NoSignalReason::LowConfidence { confidence, .. } => confidence,
            NoSignalReason::PoorRiskReward { .. } => 0.0,
        };
        Self {
            timeframe,
            direction: Direction::None,
            entry_price: 0.0,
            take_profit: 0.0,
            stop_loss: 0.0,
            confidence,
            risk_reward_ratio: 0.0,
            trend_strength: trend_strength(change_24h),
            volatility_regime: VolatilityRegime::from_change(change_24h),
            no_signal_reason: Some(reason),
        }
    }

    pub fn is_actionable(&self) -> bool {
        !self.direction.is_none()
    }

    /// Percentage move from entry to take-profit (unleveraged).
    pub fn target_move_pct(&self) -> f64 {
        if self.entry_price > 0.0 {
            (self.take_profit - self.entry_price).abs() / self.entry_price * 100.0
        } else {
            0.0
        }
    }

    /// Percentage move from entry to stop-loss (unleveraged).
    pub fn stop_move_pct(&self) -> f64 {
        if self.entry_price > 0.0 {
            (self.entry_price - self.stop_loss).abs() / self.entry_price * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_from_str() {
        assert_eq!(Timeframe::from_str("futures"), Some(Timeframe::Futures));
        assert_eq!(Timeframe::from_str("Intraday"), Some(Timeframe::Day));
        assert_eq!(Timeframe::from_str("swing"), Some(Timeframe::Swing));
        assert_eq!(Timeframe::from_str("long_term"), Some(Timeframe::Position));
        assert_eq!(Timeframe::from_str("weekly"), None);
    }

    #[test]
    fn test_position_is_strictest() {
        let position = Timeframe::Position.params();
        for tf in Timeframe::ALL {
            assert!(position.min_confidence >= tf.params().min_confidence);
            assert!(position.min_risk_reward >= tf.params().min_risk_reward);
        }
    }

    #[test]
    fn test_volatility_regime_thresholds() {
        assert_eq!(VolatilityRegime::from_change(1.0), VolatilityRegime::Stable);
        assert_eq!(VolatilityRegime::from_change(-3.0), VolatilityRegime::Moderate);
        assert_eq!(VolatilityRegime::from_change(7.5), VolatilityRegime::Volatile);
        assert_eq!(
            VolatilityRegime::from_change(-12.0),
            VolatilityRegime::HighlyVolatile
        );
    }

    #[test]
    fn test_risk_reward_ratio() {
        assert!((risk_reward_ratio(100.0, 106.0, 98.0) - 3.0).abs() < 1e-12);
        assert!((risk_reward_ratio(100.0, 94.0, 102.0) - 3.0).abs() < 1e-12);
        assert_eq!(risk_reward_ratio(100.0, 110.0, 100.0), 0.0);
    }

    #[test]
    fn test_none_signal_has_zero_prices() {
        let signal = Signal::none(
            Timeframe::Swing,
            NoSignalReason::LowConfidence {
                confidence: 40.0,
                threshold: 65.0,
            },
            1.0,
        );
        assert!(!signal.is_actionable());
        assert_eq!(signal.entry_price, 0.0);
        assert_eq!(signal.take_profit, 0.0);
        assert_eq!(signal.stop_loss, 0.0);
        assert_eq!(signal.confidence, 40.0);
    }
}
