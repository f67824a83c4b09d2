//! Periodic analysis cycles over a snapshot source.

use super::pipeline::AnalysisPipeline;
use super::report::render_report;
use crate::error::{AnalysisError, Result};
use crate::sources::MarketDataSource;
use crate::types::{AnalysisReport, Direction, Timeframe};
use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Receives finished reports.
pub trait ReportSink: Send {
    fn display(&mut self, timeframe: Timeframe, report: &AnalysisReport);

    /// A one-line status, e.g. when a cycle is skipped.
    fn status(&mut self, message: &str);
}

/// Writes rendered reports to any `Write`.
pub struct TextSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ReportSink for TextSink<W> {
    fn display(&mut self, _timeframe: Timeframe, report: &AnalysisReport) {
        if let Err(e) = writeln!(self.out, "{}", render_report(report)) {
            warn!("Failed to write report: {}", e);
        }
    }

    fn status(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "[status] {}", message) {
            warn!("Failed to write status: {}", e);
        }
    }
}

/// Writes each report as one JSON line.
pub struct JsonSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ReportSink for JsonSink<W> {
    fn display(&mut self, _timeframe: Timeframe, report: &AnalysisReport) {
        let written = serde_json::to_writer(&mut self.out, report)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out));
        if let Err(e) = written {
            warn!("Failed to write report: {}", e);
        }
    }

    fn status(&mut self, message: &str) {
        let line = serde_json::json!({ "status": message });
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("Failed to write status: {}", e);
        }
    }
}

impl<K: ReportSink + ?Sized> ReportSink for &mut K {
    fn display(&mut self, timeframe: Timeframe, report: &AnalysisReport) {
        (**self).display(timeframe, report)
    }

    fn status(&mut self, message: &str) {
        (**self).status(message)
    }
}

impl<K: ReportSink + ?Sized> ReportSink for Box<K> {
    fn display(&mut self, timeframe: Timeframe, report: &AnalysisReport) {
        (**self).display(timeframe, report)
    }

    fn status(&mut self, message: &str) {
        (**self).status(message)
    }
}

/// Drives the pipeline: pull, analyse, flag direction flips, publish.
///
/// The only state carried between cycles is the last direction per
/// timeframe.
pub struct AnalysisRunner<S, K> {
    pipeline: AnalysisPipeline,
    source: S,
    sink: K,
    previous: HashMap<Timeframe, Direction>,
}

impl<S: MarketDataSource, K: ReportSink> AnalysisRunner<S, K> {
    pub fn new(pipeline: AnalysisPipeline, source: S, sink: K) -> Self {
        Self {
            pipeline,
            source,
            sink,
            previous: HashMap::new(),
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Last published direction for a timeframe.
    pub fn previous_direction(&self, timeframe: Timeframe) -> Option<Direction> {
        self.previous.get(&timeframe).copied()
    }

    /// Run one cycle. Failures are reported to the sink and returned; an
    /// invalid snapshot skips every timeframe.
    pub fn run_cycle(&mut self) -> Result<Vec<AnalysisReport>> {
        let snapshot = match self.source.next_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Source {} failed: {}", self.source.name(), e);
                self.sink.status(&format!("Market data unavailable: {}", e));
                return Err(e);
            }
        };

        let mut reports = match self.pipeline.run_all(&snapshot) {
            Ok(reports) => reports,
            Err(e) => {
                warn!("Skipping cycle: {}", e);
                self.sink.status(&e.to_string());
                return Err(e);
            }
        };

        self.mark_direction_changes(&mut reports);
        for report in &reports {
            self.sink.display(report.timeframe, report);
        }

        debug!(
            "Cycle complete: {} actionable of {}",
            reports.iter().filter(|r| r.has_signal()).count(),
            reports.len()
        );
        Ok(reports)
    }

    /// Flag reports whose direction differs from the previous cycle's for
    /// the same timeframe, then remember the new directions.
    pub fn mark_direction_changes(&mut self, reports: &mut [AnalysisReport]) {
        for report in reports.iter_mut() {
            let direction = report.signal.direction;
            if let Some(previous) = self.previous.insert(report.timeframe, direction) {
                report.direction_changed = previous != direction;
            }
            if report.direction_changed {
                info!(
                    "{} signal changed to {}",
                    report.timeframe,
                    direction.label()
                );
            }
        }
    }

    /// Run a cycle immediately and then every `period` until `shutdown`
    /// resolves. Cycle errors are logged and the loop keeps going.
    pub async fn run<F>(&mut self, period: Duration, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut cycles = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down after {} cycles", cycles);
                    break;
                }
                _ = ticker.tick() => {
                    cycles += 1;
                    if let Err(e) = self.run_cycle() {
                        match e {
                            AnalysisError::InvalidSnapshot(_) => {}
                            e if e.is_transient() => debug!("Transient failure: {}", e),
                            e => error!("Cycle failed: {}", e),
                        }
                    }
                }
            }
        }
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::models::test_support::snapshot;
    use crate::types::{AdxValue, IndicatorSet, MarketSnapshot};

    struct ScriptedSource {
        snapshots: Vec<MarketSnapshot>,
    }

    impl MarketDataSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn next_snapshot(&mut self) -> Result<MarketSnapshot> {
            if self.snapshots.is_empty() {
                return Err(AnalysisError::Source("exhausted".to_string()));
            }
            Ok(self.snapshots.remove(0))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        reports: Vec<AnalysisReport>,
        statuses: Vec<String>,
    }

    impl ReportSink for MemorySink {
        fn display(&mut self, _timeframe: Timeframe, report: &AnalysisReport) {
            self.reports.push(report.clone());
        }

        fn status(&mut self, message: &str) {
            self.statuses.push(message.to_string());
        }
    }

    fn runner(snapshots: Vec<MarketSnapshot>) -> AnalysisRunner<ScriptedSource, MemorySink> {
        AnalysisRunner::new(
            AnalysisPipeline::default(),
            ScriptedSource { snapshots },
            MemorySink::default(),
        )
    }

    #[test]
    fn test_cycle_publishes_every_timeframe() {
        let mut runner = runner(vec![snapshot(50_000.0, 1.0)]);
        let reports = runner.run_cycle().unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(runner.sink().reports.len(), 4);
        assert!(reports.iter().all(|r| !r.direction_changed));
        assert_eq!(
            runner.previous_direction(Timeframe::Swing),
            Some(Direction::None)
        );
    }

    fn futures_long_report() -> AnalysisReport {
        let indicators = IndicatorSet {
            rsi: Some(25.0),
            adx: Some(AdxValue {
                adx: 30.0,
                di_plus: 28.0,
                di_minus: 15.0,
            }),
            ..Default::default()
        };
        AnalysisPipeline::default().run_with_indicators(
            &snapshot(50_000.0, 3.2),
            Timeframe::Futures,
            indicators,
            Vec::new(),
        )
    }

    #[test]
    fn test_direction_flip_is_flagged() {
        let mut runner = runner(Vec::new());
        let mut quiet = AnalysisPipeline::default()
            .run(&snapshot(50_000.0, 1.0), Timeframe::Futures)
            .unwrap();
        runner.mark_direction_changes(std::slice::from_mut(&mut quiet));
        assert!(!quiet.direction_changed);

        let mut long = futures_long_report();
        assert_eq!(long.signal.direction, Direction::Long);
        runner.mark_direction_changes(std::slice::from_mut(&mut long));
        assert!(long.direction_changed);

        let mut again = futures_long_report();
        runner.mark_direction_changes(std::slice::from_mut(&mut again));
        assert!(!again.direction_changed);
        assert_eq!(
            runner.previous_direction(Timeframe::Futures),
            Some(Direction::Long)
        );
    }

    #[test]
    fn test_source_failure_reports_status() {
        let mut runner = runner(Vec::new());
        let err = runner.run_cycle().unwrap_err();
        assert!(err.is_transient());
        assert_eq!(runner.sink().statuses.len(), 1);
    }

    #[test]
    fn test_invalid_snapshot_skips_cycle_with_one_status() {
        let mut runner = runner(vec![snapshot(f64::NAN, 1.0)]);
        let err = runner.run_cycle().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSnapshot(_)));
        assert!(runner.sink().reports.is_empty());
        assert_eq!(runner.sink().statuses.len(), 1);
        assert!(runner.sink().statuses[0].starts_with("No valid market data"));
    }

    #[test]
    fn test_text_sink_renders_sections() {
        let mut sink = TextSink::new(Vec::new());
        let mut runner = AnalysisRunner::new(
            AnalysisPipeline::default(),
            ScriptedSource {
                snapshots: vec![snapshot(50_000.0, 1.0)],
            },
            &mut sink,
        );
        runner.run_cycle().unwrap();
        drop(runner);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.matches("MARKET OVERVIEW").count(), 4);
    }

    #[test]
    fn test_json_sink_writes_one_line_per_report() {
        let mut sink = JsonSink::new(Vec::new());
        let report = futures_long_report();
        sink.display(Timeframe::Futures, &report);
        sink.status("paused");
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: AnalysisReport = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.signal.direction, Direction::Long);
        assert_eq!(parsed.timeframe, Timeframe::Futures);
        assert_eq!(lines[1], r#"{"status":"paused"}"#);
    }

    #[tokio::test]
    async fn test_run_starts_immediately_and_stops() {
        let snapshots = (0..50).map(|_| snapshot(50_000.0, 1.0)).collect();
        let mut runner = runner(snapshots);
        let cycles = runner
            .run(
                Duration::from_millis(10),
                tokio::time::sleep(Duration::from_millis(35)),
            )
            .await;
        assert!(cycles >= 1);
        assert_eq!(runner.sink().reports.len(), cycles * 4);
    }
}
