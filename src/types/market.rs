use super::OhlcPoint;
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time market data for a single asset.
///
/// Produced entirely by the market data collaborator and never mutated by the
/// analysis core. Historical arrays are aligned by index; an optional array
/// whose length differs from `prices` is ignored rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Current price.
    pub price: f64,
    /// Price change over the last 24h, in percent.
    pub change_24h: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    /// Historical closing prices, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highs: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lows: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc_dominance: Option<f64>,
    /// Fundamental health score (0-100) supplied by the data collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fundamental_score: Option<f64>,
    /// When the observation was taken.
    #[serde(default = "Utc::now")]
    pub observed_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Create a snapshot with only the required scalar fields.
    pub fn new(
        price: f64,
        change_24h: f64,
        high_24h: f64,
        low_24h: f64,
        volume_24h: f64,
        market_cap: f64,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            price,
            change_24h,
            high_24h,
            low_24h,
            volume_24h,
            market_cap,
            prices: None,
            volumes: None,
            highs: None,
            lows: None,
            btc_dominance: None,
            fundamental_score: None,
            observed_at,
        }
    }

    /// Attach historical closes (and optionally volumes).
    pub fn with_history(mut self, prices: Vec<f64>, volumes: Option<Vec<f64>>) -> Self {
        self.prices = Some(prices);
        self.volumes = volumes;
        self
    }

    /// Attach historical highs and lows.
    pub fn with_ranges(mut self, highs: Vec<f64>, lows: Vec<f64>) -> Self {
        self.highs = Some(highs);
        self.lows = Some(lows);
        self
    }

    /// Check the required scalar fields.
    ///
    /// A snapshot failing this check aborts the whole analysis cycle.
    pub fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AnalysisError::InvalidSnapshot(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        if !self.change_24h.is_finite() {
            return Err(AnalysisError::InvalidSnapshot(
                "24h change is not a number".to_string(),
            ));
        }
        if !self.volume_24h.is_finite() || self.volume_24h < 0.0 {
            return Err(AnalysisError::InvalidSnapshot(format!(
                "24h volume must be non-negative, got {}",
                self.volume_24h
            )));
        }
        if !self.market_cap.is_finite() || self.market_cap < 0.0 {
            return Err(AnalysisError::InvalidSnapshot(format!(
                "market cap must be non-negative, got {}",
                self.market_cap
            )));
        }
        if !self.high_24h.is_finite() || !self.low_24h.is_finite() || self.high_24h < self.low_24h {
            return Err(AnalysisError::InvalidSnapshot(format!(
                "24h range is inverted or not a number ({} / {})",
                self.high_24h, self.low_24h
            )));
        }
        Ok(())
    }

    /// Historical closes; empty when the feed supplied none.
    pub fn price_history(&self) -> &[f64] {
        self.prices.as_deref().unwrap_or(&[])
    }

    /// Historical volumes, only when aligned with the price history.
    pub fn aligned_volumes(&self) -> Option<&[f64]> {
        self.aligned(self.volumes.as_deref())
    }

    /// Historical highs, only when aligned with the price history.
    pub fn aligned_highs(&self) -> Option<&[f64]> {
        self.aligned(self.highs.as_deref())
    }

    /// Historical lows, only when aligned with the price history.
    pub fn aligned_lows(&self) -> Option<&[f64]> {
        self.aligned(self.lows.as_deref())
    }

    fn aligned<'a>(&self, series: Option<&'a [f64]>) -> Option<&'a [f64]> {
        let len = self.price_history().len();
        series.filter(|s| len > 0 && s.len() == len)
    }

    /// Build candles from the historical arrays.
    ///
    /// Close-only feeds produce synthetic candles whose open is the previous
    /// close and whose high/low span open and close.
    pub fn candles(&self) -> Vec<OhlcPoint> {
        let prices = self.price_history();
        let highs = self.aligned_highs();
        let lows = self.aligned_lows();
        let volumes = self.aligned_volumes();

        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let open = if i == 0 { close } else { prices[i - 1] };
                let high = highs.map(|h| h[i]).unwrap_or_else(|| open.max(close));
                let low = lows.map(|l| l[i]).unwrap_or_else(|| open.min(close));
                OhlcPoint {
                    open,
                    high: high.max(open.max(close)),
                    low: low.min(open.min(close)),
                    close,
                    volume: volumes.map(|v| v[i]),
                }
            })
            .collect()
    }

    /// UTC hour of the observation, used by session-aware rules.
    pub fn session_hour(&self) -> u32 {
        self.observed_at.hour()
    }
}
