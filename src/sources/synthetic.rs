use super::MarketDataSource;
use crate::error::Result;
use crate::types::MarketSnapshot;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Bars of history carried in each snapshot.
const HISTORY_LEN: usize = 200;
/// Bars treated as one day for the 24h fields.
const DAY_BARS: usize = 24;

#[derive(Debug, Clone, Copy)]
struct Bar {
    close: f64,
    high: f64,
    low: f64,
    volume: f64,
}

/// Seeded random walk, for running without a data feed.
///
/// The same seed always yields the same sequence of prices.
pub struct SyntheticSource {
    rng: StdRng,
    bars: VecDeque<Bar>,
    fundamental_score: f64,
}

impl SyntheticSource {
    pub fn new(seed: u64, start_price: f64) -> Self {
        let mut source = Self {
            rng: StdRng::seed_from_u64(seed),
            bars: VecDeque::with_capacity(HISTORY_LEN + 1),
            fundamental_score: 50.0,
        };

        let mut price = start_price.max(1.0);
        for _ in 0..HISTORY_LEN {
            let bar = source.step(price);
            price = bar.close;
            source.bars.push_back(bar);
        }
        source
    }

    fn step(&mut self, previous: f64) -> Bar {
        // Up to 1.5% per bar, with a slight upward drift
        let change = self.rng.gen_range(-0.015..0.0155);
        let close = (previous * (1.0 + change)).max(0.01);
        let wick = previous * self.rng.gen_range(0.0..0.006);
        let high = previous.max(close) + wick;
        let low = (previous.min(close) - wick).max(0.005);
        let volume = self.rng.gen_range(800.0..1_200.0) * (1.0 + change.abs() * 20.0);
        Bar {
            close,
            high,
            low,
            volume,
        }
    }

    fn advance(&mut self) {
        let last = self.bars.back().map(|b| b.close).unwrap_or(1.0);
        let bar = self.step(last);
        self.bars.push_back(bar);
        while self.bars.len() > HISTORY_LEN {
            self.bars.pop_front();
        }
        self.fundamental_score =
            (self.fundamental_score + self.rng.gen_range(-2.0..2.0)).clamp(0.0, 100.0);
    }

    fn snapshot(&self) -> MarketSnapshot {
        let prices: Vec<f64> = self.bars.iter().map(|b| b.close).collect();
        let highs: Vec<f64> = self.bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = self.bars.iter().map(|b| b.low).collect();
        let volumes: Vec<f64> = self.bars.iter().map(|b| b.volume).collect();

        let n = prices.len();
        let price = prices[n - 1];
        let day_start = n.saturating_sub(DAY_BARS + 1);
        let day_open = prices[day_start];
        let high_24h = highs[day_start..].iter().copied().fold(f64::MIN, f64::max);
        let low_24h = lows[day_start..].iter().copied().fold(f64::MAX, f64::min);
        let volume_24h: f64 = volumes[day_start..].iter().sum::<f64>() * price;

        let mut snapshot = MarketSnapshot::new(
            price,
            (price - day_open) / day_open * 100.0,
            high_24h,
            low_24h,
            volume_24h,
            price * 19_000_000.0,
            Utc::now(),
        )
        .with_history(prices, Some(volumes))
        .with_ranges(highs, lows);
        snapshot.fundamental_score = Some(self.fundamental_score);
        snapshot
    }
}

impl MarketDataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn next_snapshot(&mut self) -> Result<MarketSnapshot> {
        self.advance();
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_prices() {
        let mut a = SyntheticSource::new(7, 50_000.0);
        let mut b = SyntheticSource::new(7, 50_000.0);
        for _ in 0..3 {
            let sa = a.next_snapshot().unwrap();
            let sb = b.next_snapshot().unwrap();
            assert_eq!(sa.prices, sb.prices);
            assert_eq!(sa.price, sb.price);
        }
    }

    #[test]
    fn test_snapshots_are_valid_and_aligned() {
        let mut source = SyntheticSource::new(42, 50_000.0);
        let snapshot = source.next_snapshot().unwrap();
        snapshot.validate().unwrap();
        assert_eq!(snapshot.price_history().len(), HISTORY_LEN);
        assert!(snapshot.aligned_highs().is_some());
        assert!(snapshot.aligned_lows().is_some());
        assert!(snapshot.aligned_volumes().is_some());
        assert!(snapshot.high_24h >= snapshot.price);
        assert!(snapshot.low_24h <= snapshot.price);
    }

    #[test]
    fn test_history_window_slides() {
        let mut source = SyntheticSource::new(1, 100.0);
        let first = source.next_snapshot().unwrap();
        let second = source.next_snapshot().unwrap();
        let a = first.price_history();
        let b = second.price_history();
        assert_eq!(&a[1..], &b[..b.len() - 1]);
    }
}
