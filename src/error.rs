use thiserror::Error;

/// Analysis error types.
///
/// Indicator shortfalls and failed signal gates are not errors: they surface
/// as absent indicators and `Direction::None` signals respectively.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No valid market data: {0}")]
    InvalidSnapshot(String),

    #[error("Market data source error: {0}")]
    Source(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Whether the error should abort the current cycle only (and the next
    /// tick may succeed).
    pub fn is_transient(&self) -> bool {
        matches!(self, AnalysisError::Source(_) | AnalysisError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
