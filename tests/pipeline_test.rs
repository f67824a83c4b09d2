//! End-to-end tests for the analysis pipeline

use chrono::{TimeZone, Utc};
use wraith::config::{Config, RiskConfig};
use wraith::services::{render_report, AnalysisPipeline, RiskManager, SignalGenerator};
use wraith::sources::{MarketDataSource, SyntheticSource};
use wraith::types::*;
use wraith::AnalysisError;

fn snapshot(price: f64, change_24h: f64) -> MarketSnapshot {
    MarketSnapshot::new(
        price,
        change_24h,
        price * 1.02,
        price * 0.97,
        2.5e10,
        9.8e11,
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    )
}

/// RSI 25 with a strong bullish ADX.
fn futures_indicators() -> IndicatorSet {
    IndicatorSet {
        rsi: Some(25.0),
        adx: Some(AdxValue {
            adx: 30.0,
            di_plus: 28.0,
            di_minus: 15.0,
        }),
        ..Default::default()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6 * b.abs().max(1.0)
}

#[test]
fn test_oversold_trending_futures_long() {
    let report = AnalysisPipeline::default().run_with_indicators(
        &snapshot(50_000.0, 3.2),
        Timeframe::Futures,
        futures_indicators(),
        Vec::new(),
    );

    let signal = &report.signal;
    assert_eq!(signal.direction, Direction::Long);
    assert!(approx(signal.entry_price, 49_500.0));
    assert!(approx(signal.take_profit, 52_470.0));
    assert!(approx(signal.stop_loss, 48_015.0));
    assert!(approx(signal.risk_reward_ratio, 2.0));
    assert_eq!(signal.volatility_regime, VolatilityRegime::Moderate);

    // Oversold RSI reads bearish on sentiment even though the model goes long
    assert!(approx(report.sentiment.technical, -0.8));
    assert!(approx(report.sentiment.score, -0.4));

    let risk = &report.risk;
    assert_eq!(risk.recommended_leverage, 10);
    assert!(approx(risk.stop_loss_price, signal.stop_loss));
    assert!(approx(risk.liquidation_price.unwrap(), 44_550.0));
    assert!(approx(risk.max_drawdown_pct, 30.0));
    assert!(approx(risk.potential_profit_pct, 60.0));
    assert!(risk
        .recommendations
        .iter()
        .any(|r| r == "Recommended leverage: 10x"));
}

#[test]
fn test_position_signal_assessment() {
    let indicators = IndicatorSet {
        levels: PriceLevels {
            major_support: vec![47_000.0],
            ..Default::default()
        },
        ..Default::default()
    };
    let signal = SignalGenerator::new(Timeframe::Position).build(
        Direction::Long,
        80.0,
        &snapshot(50_000.0, 4.0),
        &indicators,
    );
    assert!(signal.is_actionable());

    let risk = RiskManager::default().assess(&signal, Timeframe::Position);
    // 5 + 1 for confidence 80, + 1 for RR 4 under 4.5
    assert_eq!(risk.risk_score, 7.0);
    assert_eq!(risk.max_position_size_pct, 0.6);
    assert_eq!(risk.recommended_leverage, 2);
    assert!(approx(risk.liquidation_price.unwrap(), 24_500.0));
    assert!(approx(risk.max_drawdown_pct, 12.0));
    assert!(approx(risk.potential_profit_pct, 48.0));
    assert!(approx(risk.risk_reward_ratio, 4.0));
    assert!(!risk
        .recommendations
        .iter()
        .any(|r| r.starts_with("Consider reducing leverage")));
    assert_eq!(
        risk.recommendations.last().map(String::as_str),
        Some("Consider dollar-cost averaging")
    );
}

#[test]
fn test_bad_risk_limits_do_not_abort_assessment() {
    for cap in [-0.01, f64::NAN] {
        let config = Config {
            risk: RiskConfig {
                max_risk_per_trade: 0.02,
                max_account_risk: cap,
            },
            ..Config::default()
        };
        let report = AnalysisPipeline::new(&config).run_with_indicators(
            &snapshot(50_000.0, 3.2),
            Timeframe::Futures,
            futures_indicators(),
            Vec::new(),
        );
        assert_eq!(report.signal.direction, Direction::Long);
        assert!(report.risk.max_position_size_pct >= 0.0);
    }
}

#[test]
fn test_single_price_leaves_indicators_absent() {
    let snap = snapshot(50_000.0, 3.2).with_history(vec![50_000.0], None);
    let report = AnalysisPipeline::default()
        .run(&snap, Timeframe::Futures)
        .unwrap();
    assert!(report.indicators.atr.is_none());
    assert!(report.indicators.rsi.is_none());
    assert!(report.patterns.is_empty());
}

#[test]
fn test_invalid_snapshot_aborts_cycle() {
    let mut snap = snapshot(50_000.0, 1.0);
    snap.change_24h = f64::NAN;
    let err = AnalysisPipeline::default().run_all(&snap).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidSnapshot(_)));

    let mut inverted = snapshot(50_000.0, 1.0);
    inverted.high_24h = inverted.low_24h - 1.0;
    assert!(AnalysisPipeline::default().run_all(&inverted).is_err());
}

#[test]
fn test_pipeline_is_idempotent() {
    let mut source = SyntheticSource::new(7, 30_000.0);
    let snap = source.next_snapshot().unwrap();
    let pipeline = AnalysisPipeline::new(&Config::default());
    let first = pipeline.run_all(&snap).unwrap();
    let second = pipeline.run_all(&snap).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_signal_invariants_over_synthetic_market() {
    let pipeline = AnalysisPipeline::default();
    let mut source = SyntheticSource::new(11, 40_000.0);

    for _ in 0..40 {
        let snap = source.next_snapshot().unwrap();
        for report in pipeline.run_all(&snap).unwrap() {
            let params = report.timeframe.params();
            assert!((0.0..=100.0).contains(&report.long_score));
            assert!((0.0..=100.0).contains(&report.short_score));
            assert!(report.long_score + report.short_score <= 100.0 + 1e-9);
            assert!((-1.0..=1.0).contains(&report.sentiment.score));

            let signal = &report.signal;
            let risk = &report.risk;
            match signal.direction {
                Direction::Long => {
                    assert!(signal.stop_loss < signal.entry_price);
                    assert!(signal.entry_price < signal.take_profit);
                }
                Direction::Short => {
                    assert!(signal.take_profit < signal.entry_price);
                    assert!(signal.entry_price < signal.stop_loss);
                }
                Direction::None => {
                    assert_eq!(signal.entry_price, 0.0);
                    assert_eq!(*risk, RiskAssessment::no_trade());
                    continue;
                }
            }

            assert!(signal.confidence >= params.min_confidence);
            assert!(signal.risk_reward_ratio + 1e-9 >= params.min_risk_reward);
            assert!((1.0..=10.0).contains(&risk.risk_score));
            assert!(risk.max_position_size_pct <= 6.0);
            assert!(risk.recommended_leverage >= 1);
            assert!(risk.recommended_leverage <= params.max_leverage);

            let text = render_report(&report);
            assert!(text.contains(signal.direction.label()));
        }
    }
}
