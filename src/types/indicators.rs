use serde::{Deserialize, Serialize};

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Bollinger band levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// ADX with the directional indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdxValue {
    pub adx: f64,
    pub di_plus: f64,
    pub di_minus: f64,
}

/// Stochastic %K and %D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
}

/// Classic floor pivot levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// Fibonacci retracement levels between a swing high and low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciLevels {
    pub swing_high: f64,
    pub swing_low: f64,
    /// (ratio, price) pairs from 0.0 (swing high) to 1.0 (swing low).
    pub levels: Vec<(f64, f64)>,
}

/// Support and resistance levels, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    /// Levels found with a wider window over the whole history.
    pub major_support: Vec<f64>,
    pub major_resistance: Vec<f64>,
}

impl PriceLevels {
    /// Highest support strictly below `price`.
    pub fn nearest_support_below(&self, price: f64) -> Option<f64> {
        nearest_below(&self.support, price)
    }

    /// Lowest resistance strictly above `price`.
    pub fn nearest_resistance_above(&self, price: f64) -> Option<f64> {
        nearest_above(&self.resistance, price)
    }

    pub fn nearest_major_support_below(&self, price: f64) -> Option<f64> {
        nearest_below(&self.major_support, price)
    }

    pub fn nearest_major_resistance_above(&self, price: f64) -> Option<f64> {
        nearest_above(&self.major_resistance, price)
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}

fn nearest_below(levels: &[f64], price: f64) -> Option<f64> {
    levels
        .iter()
        .copied()
        .filter(|l| *l < price)
        .fold(None, |acc: Option<f64>, l| Some(acc.map_or(l, |a| a.max(l))))
}

fn nearest_above(levels: &[f64], price: f64) -> Option<f64> {
    levels
        .iter()
        .copied()
        .filter(|l| *l > price)
        .fold(None, |acc: Option<f64>, l| Some(acc.map_or(l, |a| a.min(l))))
}

/// Short/medium term trend from moving-average ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

/// Long-term trend from the 50/200 moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongTermTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// Wyckoff-style market phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStructure {
    Accumulation,
    Markup,
    Distribution,
    Markdown,
    Consolidation,
}

impl MarketStructure {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Accumulation => "Accumulation",
            Self::Markup => "Markup",
            Self::Distribution => "Distribution",
            Self::Markdown => "Markdown",
            Self::Consolidation => "Consolidation",
        }
    }
}

/// A single indicator reading looked up by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Scalar(f64),
    Pair(f64, f64),
    Triple(f64, f64, f64),
    Levels(Vec<f64>),
    Label(String),
}

/// All indicators computed for one analysis cycle.
///
/// Every field is optional: an indicator that lacks history is absent and
/// abstains from scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<AdxValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stochastic: Option<StochasticValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_20: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivots: Option<PivotPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibonacci: Option<FibonacciLevels>,
    #[serde(default)]
    pub levels: PriceLevels,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_trend: Option<LongTermTrend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_structure: Option<MarketStructure>,
}

impl IndicatorSet {
    /// Look up an indicator by its identifier.
    pub fn get(&self, name: &str) -> Option<IndicatorValue> {
        match name {
            "rsi" => self.rsi.map(IndicatorValue::Scalar),
            "macd" => self.macd.map(|m| IndicatorValue::Pair(m.line, m.signal)),
            "bollinger" => self
                .bollinger
                .map(|b| IndicatorValue::Triple(b.upper, b.middle, b.lower)),
            "atr" => self.atr.map(IndicatorValue::Scalar),
            "adx" => self
                .adx
                .map(|a| IndicatorValue::Triple(a.adx, a.di_plus, a.di_minus)),
            "stochastic" => self.stochastic.map(|s| IndicatorValue::Pair(s.k, s.d)),
            "ema" => self.ema.map(IndicatorValue::Scalar),
            "sma20" => self.sma_20.map(IndicatorValue::Scalar),
            "sma50" => self.sma_50.map(IndicatorValue::Scalar),
            "vwap" => self.vwap.map(IndicatorValue::Scalar),
            "volume_ma" => self.volume_ma.map(IndicatorValue::Scalar),
            "pivots" => self.pivots.map(|p| {
                IndicatorValue::Levels(vec![p.s3, p.s2, p.s1, p.pivot, p.r1, p.r2, p.r3])
            }),
            "fibonacci" => self
                .fibonacci
                .as_ref()
                .map(|f| IndicatorValue::Levels(f.levels.iter().map(|(_, p)| *p).collect())),
            "support" if !self.levels.support.is_empty() => {
                Some(IndicatorValue::Levels(self.levels.support.clone()))
            }
            "resistance" if !self.levels.resistance.is_empty() => {
                Some(IndicatorValue::Levels(self.levels.resistance.clone()))
            }
            "major_support" if !self.levels.major_support.is_empty() => {
                Some(IndicatorValue::Levels(self.levels.major_support.clone()))
            }
            "major_resistance" if !self.levels.major_resistance.is_empty() => {
                Some(IndicatorValue::Levels(self.levels.major_resistance.clone()))
            }
            "trend" => self.trend.map(|t| IndicatorValue::Label(format!("{:?}", t))),
            "long_term_trend" => self
                .long_term_trend
                .map(|t| IndicatorValue::Label(format!("{:?}", t))),
            "market_structure" => self
                .market_structure
                .map(|m| IndicatorValue::Label(m.name().to_string())),
            _ => None,
        }
    }

    /// Names of the indicators present in this set.
    pub fn available(&self) -> Vec<&'static str> {
        const NAMES: [&str; 20] = [
            "rsi",
            "macd",
            "bollinger",
            "atr",
            "adx",
            "stochastic",
            "ema",
            "sma20",
            "sma50",
            "vwap",
            "volume_ma",
            "pivots",
            "fibonacci",
            "support",
            "resistance",
            "major_support",
            "major_resistance",
            "trend",
            "long_term_trend",
            "market_structure",
        ];
        NAMES
            .iter()
            .copied()
            .filter(|n| self.get(n).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_tuples() {
        let set = IndicatorSet {
            macd: Some(MacdValue {
                line: 1.5,
                signal: 1.0,
                histogram: 0.5,
            }),
            adx: Some(AdxValue {
                adx: 30.0,
                di_plus: 28.0,
                di_minus: 15.0,
            }),
            ..Default::default()
        };
        assert_eq!(set.get("macd"), Some(IndicatorValue::Pair(1.5, 1.0)));
        assert_eq!(
            set.get("adx"),
            Some(IndicatorValue::Triple(30.0, 28.0, 15.0))
        );
        assert_eq!(set.get("rsi"), None);
        assert_eq!(set.get("unknown"), None);
    }

    #[test]
    fn test_available_lists_present_only() {
        let set = IndicatorSet {
            rsi: Some(55.0),
            atr: Some(2.0),
            ..Default::default()
        };
        assert_eq!(set.available(), vec!["rsi", "atr"]);
    }

    #[test]
    fn test_get_major_levels_and_long_term_trend() {
        let set = IndicatorSet {
            levels: PriceLevels {
                major_support: vec![90.0],
                major_resistance: vec![120.0, 130.0],
                ..Default::default()
            },
            long_term_trend: Some(LongTermTrend::Bearish),
            ..Default::default()
        };
        assert_eq!(
            set.get("major_support"),
            Some(IndicatorValue::Levels(vec![90.0]))
        );
        assert_eq!(
            set.get("major_resistance"),
            Some(IndicatorValue::Levels(vec![120.0, 130.0]))
        );
        assert_eq!(
            set.get("long_term_trend"),
            Some(IndicatorValue::Label("Bearish".to_string()))
        );
        assert_eq!(set.get("support"), None);
        assert_eq!(
            set.available(),
            vec!["major_support", "major_resistance", "long_term_trend"]
        );
    }

    #[test]
    fn test_nearest_levels() {
        let levels = PriceLevels {
            support: vec![90.0, 95.0, 101.0],
            resistance: vec![99.0, 105.0, 110.0],
            ..Default::default()
        };
        assert_eq!(levels.nearest_support_below(100.0), Some(95.0));
        assert_eq!(levels.nearest_resistance_above(100.0), Some(105.0));
        assert_eq!(levels.nearest_major_support_below(100.0), None);
    }
}
