//! Plain-text rendering of analysis reports.

use crate::types::AnalysisReport;
use std::fmt::Write;

/// Section headings, in render order.
pub const SECTIONS: [&str; 5] = [
    "MARKET OVERVIEW",
    "TECHNICAL ANALYSIS",
    "TRADING SIGNAL",
    "RISK ASSESSMENT",
    "RECOMMENDATIONS",
];

/// Format a dollar amount with thousands separators and two decimals.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Render one timeframe's report.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    let snap = &report.snapshot;
    let ind = &report.indicators;
    let signal = &report.signal;
    let risk = &report.risk;

    writeln!(
        out,
        "==== {} ({}) ====",
        report.timeframe.name().to_uppercase(),
        report.timeframe.holding_period()
    )?;

    writeln!(out, "{}", SECTIONS[0])?;
    writeln!(out, "  Price:        {}", format_usd(snap.price))?;
    writeln!(out, "  24h Change:   {:+.2}%", snap.change_24h)?;
    writeln!(
        out,
        "  24h Range:    {} - {}",
        format_usd(snap.low_24h),
        format_usd(snap.high_24h)
    )?;
    writeln!(out, "  24h Volume:   {}", format_usd(snap.volume_24h))?;
    writeln!(out, "  Market Cap:   {}", format_usd(snap.market_cap))?;
    if let Some(dominance) = snap.btc_dominance {
        writeln!(out, "  BTC Dominance: {:.2}%", dominance)?;
    }

    writeln!(out, "{}", SECTIONS[1])?;
    if let Some(rsi) = ind.rsi {
        writeln!(out, "  RSI:          {:.2}", rsi)?;
    }
    if let Some(macd) = ind.macd {
        writeln!(
            out,
            "  MACD:         {:.2} / signal {:.2} / hist {:.2}",
            macd.line, macd.signal, macd.histogram
        )?;
    }
    if let Some(bands) = ind.bollinger {
        writeln!(
            out,
            "  Bollinger:    {} / {} / {}",
            format_usd(bands.lower),
            format_usd(bands.middle),
            format_usd(bands.upper)
        )?;
    }
    if let Some(atr) = ind.atr {
        writeln!(out, "  ATR:          {}", format_usd(atr))?;
    }
    if let Some(adx) = ind.adx {
        writeln!(
            out,
            "  ADX:          {:.2} (DI+ {:.2}, DI- {:.2})",
            adx.adx, adx.di_plus, adx.di_minus
        )?;
    }
    if let Some(stoch) = ind.stochastic {
        writeln!(out, "  Stochastic:   %K {:.2} / %D {:.2}", stoch.k, stoch.d)?;
    }
    if let Some(vwap) = ind.vwap {
        writeln!(out, "  VWAP:         {}", format_usd(vwap))?;
    }
    if let Some(pivots) = ind.pivots {
        writeln!(
            out,
            "  Pivots:       S1 {} / P {} / R1 {}",
            format_usd(pivots.s1),
            format_usd(pivots.pivot),
            format_usd(pivots.r1)
        )?;
    }
    if let Some(support) = ind.levels.nearest_support_below(snap.price) {
        writeln!(out, "  Support:      {}", format_usd(support))?;
    }
    if let Some(resistance) = ind.levels.nearest_resistance_above(snap.price) {
        writeln!(out, "  Resistance:   {}", format_usd(resistance))?;
    }
    if let Some(trend) = ind.trend {
        writeln!(out, "  Trend:        {:?}", trend)?;
    }
    if let Some(structure) = ind.market_structure {
        writeln!(out, "  Structure:    {}", structure.name())?;
    }
    for pattern in &report.patterns {
        writeln!(
            out,
            "  Pattern:      {} ({:?}, {:.2}%)",
            pattern.name, pattern.bias, pattern.confidence
        )?;
    }
    writeln!(
        out,
        "  Scores:       long {:.2} / short {:.2}",
        report.long_score, report.short_score
    )?;
    writeln!(
        out,
        "  Sentiment:    {} {:+.2} (technical {:+.2}, market {:+.2})",
        report.sentiment.label(),
        report.sentiment.score,
        report.sentiment.technical,
        report.sentiment.market_metrics
    )?;

    writeln!(out, "{}", SECTIONS[2])?;
    let changed = if report.direction_changed {
        " (changed)"
    } else {
        ""
    };
    writeln!(out, "  Direction:    {}{}", signal.direction.label(), changed)?;
    match &signal.no_signal_reason {
        Some(reason) if !signal.is_actionable() => {
            writeln!(out, "  No signal:    {}", reason)?;
        }
        _ => {
            writeln!(out, "  Entry:        {}", format_usd(signal.entry_price))?;
            writeln!(out, "  Take Profit:  {}", format_usd(signal.take_profit))?;
            writeln!(out, "  Stop Loss:    {}", format_usd(signal.stop_loss))?;
            writeln!(out, "  Confidence:   {:.2}%", signal.confidence)?;
            writeln!(out, "  Risk/Reward:  {:.2}", signal.risk_reward_ratio)?;
        }
    }
    writeln!(
        out,
        "  Volatility:   {} (trend strength {:.2})",
        signal.volatility_regime.label(),
        signal.trend_strength
    )?;

    writeln!(out, "{}", SECTIONS[3])?;
    writeln!(out, "  Risk Score:   {:.2}/10", risk.risk_score)?;
    writeln!(out, "  Position:     {:.2}% of account", risk.max_position_size_pct)?;
    writeln!(out, "  Leverage:     {}x", risk.recommended_leverage)?;
    if let Some(liquidation) = risk.liquidation_price {
        writeln!(out, "  Liquidation:  {}", format_usd(liquidation))?;
    }
    writeln!(out, "  Max Drawdown: {:.2}%", risk.max_drawdown_pct)?;
    writeln!(out, "  Profit:       {:.2}%", risk.potential_profit_pct)?;

    writeln!(out, "{}", SECTIONS[4])?;
    for rec in &risk.recommendations {
        writeln!(out, "  • {}", rec)?;
    }

    Ok(())
}
