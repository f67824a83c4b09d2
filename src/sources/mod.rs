//! Market snapshot sources.

pub mod json_file;
pub mod synthetic;

pub use json_file::JsonFileSource;
pub use synthetic::SyntheticSource;

use crate::error::Result;
use crate::types::MarketSnapshot;

/// Supplies one snapshot per analysis cycle.
pub trait MarketDataSource: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch the latest snapshot.
    fn next_snapshot(&mut self) -> Result<MarketSnapshot>;
}
