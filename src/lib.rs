//! Wraith - multi-timeframe trading signal analysis
//!
//! A market snapshot flows through indicators, pattern recognition and a
//! per-timeframe scoring model, then into signal construction and risk
//! assessment. Every stage is a pure function of the snapshot.

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

pub use error::{AnalysisError, Result};
pub use services::AnalysisPipeline;
pub use types::*;
