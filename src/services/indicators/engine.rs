//! Computes the full indicator set for one snapshot.

use super::{
    fibonacci, levels, pivots, structure, Adx, Atr, BollingerBands, Ema, Indicator, Macd, Rsi,
    Sma, Stochastic, VolumeMa, Vwap,
};
use crate::config::IndicatorConfig;
use crate::types::{closes, IndicatorSet, IndicatorValue, MarketSnapshot, OhlcPoint};

/// Stateless indicator calculator bound to a set of periods.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute every indicator the snapshot has enough history for.
    pub fn compute_all(&self, snapshot: &MarketSnapshot) -> IndicatorSet {
        let cfg = &self.config;
        let candles = snapshot.candles();
        let prices = snapshot.price_history();

        let fibonacci = match (snapshot.aligned_highs(), snapshot.aligned_lows()) {
            (Some(highs), Some(lows)) if prices.len() >= 2 => fibonacci::from_series(highs, lows),
            _ if prices.len() >= 2 => fibonacci::from_series(prices, prices),
            _ => fibonacci::retracement(snapshot.high_24h, snapshot.low_24h),
        };

        let market_structure = match (
            snapshot.aligned_volumes(),
            snapshot.aligned_highs(),
            snapshot.aligned_lows(),
        ) {
            (Some(volumes), Some(highs), Some(lows)) => {
                structure::market_structure(prices, volumes, highs, lows)
            }
            _ => None,
        };

        IndicatorSet {
            rsi: Rsi::new(cfg.rsi_period).calculate(&candles),
            macd: Macd::new(cfg.macd_fast, cfg.macd_slow, cfg.macd_signal).calculate(&candles),
            bollinger: BollingerBands::new(cfg.bollinger_period, cfg.bollinger_std_dev)
                .calculate(&candles),
            atr: Atr::new(cfg.atr_period).calculate(&candles),
            adx: Adx::new(cfg.adx_period).calculate(&candles),
            stochastic: Stochastic::new(cfg.stochastic_k, cfg.stochastic_d).calculate(&candles),
            ema: Ema::new(cfg.ema_period).calculate(&candles),
            sma_20: Sma::new(20).calculate(&candles),
            sma_50: Sma::new(50).calculate(&candles),
            vwap: Vwap::new(cfg.vwap_period).calculate(&candles),
            volume_ma: VolumeMa::new(cfg.volume_ma_period).calculate(&candles),
            pivots: pivots::pivot_points(snapshot.high_24h, snapshot.low_24h, snapshot.price),
            fibonacci,
            levels: levels::price_levels(prices, cfg),
            trend: structure::trend(prices),
            long_term_trend: structure::long_term_trend(prices),
            market_structure,
        }
    }

    /// Compute a single indicator by identifier from raw candles.
    ///
    /// Identifiers match `IndicatorSet::get`. Snapshot-level indicators
    /// (pivots, market structure) use the candle extremes in place of the
    /// 24h fields.
    pub fn compute(&self, name: &str, candles: &[OhlcPoint]) -> Option<IndicatorValue> {
        let cfg = &self.config;
        let closes = closes(candles);

        let set = match name {
            "rsi" => IndicatorSet {
                rsi: Rsi::new(cfg.rsi_period).calculate(candles),
                ..Default::default()
            },
            "macd" => IndicatorSet {
                macd: Macd::new(cfg.macd_fast, cfg.macd_slow, cfg.macd_signal).calculate(candles),
                ..Default::default()
            },
            "bollinger" => IndicatorSet {
                bollinger: BollingerBands::new(cfg.bollinger_period, cfg.bollinger_std_dev)
                    .calculate(candles),
                ..Default::default()
            },
            "atr" => IndicatorSet {
                atr: Atr::new(cfg.atr_period).calculate(candles),
                ..Default::default()
            },
            "adx" => IndicatorSet {
                adx: Adx::new(cfg.adx_period).calculate(candles),
                ..Default::default()
            },
            "stochastic" => IndicatorSet {
                stochastic: Stochastic::new(cfg.stochastic_k, cfg.stochastic_d)
                    .calculate(candles),
                ..Default::default()
            },
            "ema" => IndicatorSet {
                ema: Ema::new(cfg.ema_period).calculate(candles),
                ..Default::default()
            },
            "sma20" => IndicatorSet {
                sma_20: Sma::new(20).calculate(candles),
                ..Default::default()
            },
            "sma50" => IndicatorSet {
                sma_50: Sma::new(50).calculate(candles),
                ..Default::default()
            },
            "vwap" => IndicatorSet {
                vwap: Vwap::new(cfg.vwap_period).calculate(candles),
                ..Default::default()
            },
            "volume_ma" => IndicatorSet {
                volume_ma: VolumeMa::new(cfg.volume_ma_period).calculate(candles),
                ..Default::default()
            },
            "pivots" => {
                let last = candles.last()?;
                let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
                let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                IndicatorSet {
                    pivots: pivots::pivot_points(high, low, last.close),
                    ..Default::default()
                }
            }
            "fibonacci" => {
                let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
                let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
                IndicatorSet {
                    fibonacci: fibonacci::from_series(&highs, &lows),
                    ..Default::default()
                }
            }
            "support" | "resistance" | "major_support" | "major_resistance" => IndicatorSet {
                levels: levels::price_levels(&closes, cfg),
                ..Default::default()
            },
            "trend" => IndicatorSet {
                trend: structure::trend(&closes),
                ..Default::default()
            },
            "long_term_trend" => IndicatorSet {
                long_term_trend: structure::long_term_trend(&closes),
                ..Default::default()
            },
            "market_structure" => {
                let volumes: Option<Vec<f64>> = candles.iter().map(|c| c.volume).collect();
                let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
                let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
                IndicatorSet {
                    market_structure: structure::market_structure(
                        &closes,
                        volumes.as_deref()?,
                        &highs,
                        &lows,
                    ),
                    ..Default::default()
                }
            }
            _ => return None,
        };

        set.get(name)
    }
}
