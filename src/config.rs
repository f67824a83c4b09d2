use std::env;
use std::path::PathBuf;

/// Indicator periods and windows.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr_period: usize,
    pub adx_period: usize,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub ema_period: usize,
    pub vwap_period: usize,
    pub volume_ma_period: usize,
    /// Bars scanned for support/resistance.
    pub levels_lookback: usize,
    /// Neighbours on each side a support/resistance point must dominate.
    pub levels_window: usize,
    /// Neighbours on each side a major level must dominate.
    pub major_levels_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr_period: 14,
            adx_period: 14,
            stochastic_k: 14,
            stochastic_d: 3,
            ema_period: 20,
            vwap_period: 20,
            volume_ma_period: 20,
            levels_lookback: 100,
            levels_window: 5,
            major_levels_window: 10,
        }
    }
}

/// Account-level risk limits.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Maximum risk per trade (fraction of account).
    pub max_risk_per_trade: f64,
    /// Maximum total account risk (fraction of account).
    pub max_account_risk: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_risk_per_trade: 0.02,
            max_account_risk: 0.06,
        }
    }
}

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds between analysis cycles.
    pub refresh_interval_secs: u64,
    /// JSON snapshot file to analyse; synthetic data is used when unset.
    pub snapshot_path: Option<PathBuf>,
    /// Seed for the synthetic data source.
    pub synthetic_seed: u64,
    pub output_format: OutputFormat,
    /// Patterns below this confidence are dropped.
    pub min_pattern_confidence: f64,
    pub indicators: IndicatorConfig,
    pub risk: RiskConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = IndicatorConfig::default();

        // Keep the refresh cadence within 10-60 seconds
        let refresh_interval_secs = env::var("REFRESH_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30)
            .clamp(10, 60);

        Self {
            refresh_interval_secs,
            snapshot_path: env::var("SNAPSHOT_PATH").ok().map(PathBuf::from),
            synthetic_seed: env::var("SYNTHETIC_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(42),
            output_format: env::var("OUTPUT_FORMAT")
                .ok()
                .and_then(|v| OutputFormat::from_str(&v))
                .unwrap_or(OutputFormat::Text),
            min_pattern_confidence: env::var("MIN_PATTERN_CONFIDENCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(65.0),
            indicators: IndicatorConfig {
                rsi_period: env_usize("RSI_PERIOD", defaults.rsi_period),
                macd_fast: env_usize("MACD_FAST", defaults.macd_fast),
                macd_slow: env_usize("MACD_SLOW", defaults.macd_slow),
                macd_signal: env_usize("MACD_SIGNAL", defaults.macd_signal),
                bollinger_period: env_usize("BOLLINGER_PERIOD", defaults.bollinger_period),
                bollinger_std_dev: env::var("BOLLINGER_STD_DEV")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.bollinger_std_dev),
                atr_period: env_usize("ATR_PERIOD", defaults.atr_period),
                adx_period: env_usize("ADX_PERIOD", defaults.adx_period),
                levels_lookback: env_usize("LEVELS_LOOKBACK", defaults.levels_lookback),
                levels_window: env_usize("LEVELS_WINDOW", defaults.levels_window),
                ..defaults
            },
            risk: RiskConfig {
                max_risk_per_trade: env_fraction("MAX_RISK_PER_TRADE", 0.02),
                max_account_risk: env_fraction("MAX_ACCOUNT_RISK", 0.06),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
            snapshot_path: None,
            synthetic_seed: 42,
            output_format: OutputFormat::Text,
            min_pattern_confidence: 65.0,
            indicators: IndicatorConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

/// Parse a positive window length, falling back when unset or zero.
fn env_usize(key: &str, default: usize) -> usize {
    parse_window(env::var(key).ok().as_deref(), default)
}

/// Parse an account fraction, falling back when unset, negative or not finite.
fn env_fraction(key: &str, default: f64) -> f64 {
    parse_fraction(env::var(key).ok().as_deref(), default)
}

fn parse_window(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn parse_fraction(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}
