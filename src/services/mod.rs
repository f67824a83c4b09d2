pub mod indicators;
pub mod models;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod runner;
pub mod sentiment;
pub mod signal_generator;

pub use indicators::IndicatorEngine;
pub use models::{model_for, ScoreCard, TimeframeModel};
pub use patterns::PatternRecognizer;
pub use pipeline::AnalysisPipeline;
pub use report::{format_usd, render_report};
pub use risk::RiskManager;
pub use runner::{AnalysisRunner, JsonSink, ReportSink, TextSink};
pub use sentiment::market_sentiment;
pub use signal_generator::SignalGenerator;
