use super::MarketDataSource;
use crate::error::{AnalysisError, Result};
use crate::types::MarketSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a JSON-encoded [`MarketSnapshot`] from disk on every cycle, so an
/// external collector can keep rewriting the file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MarketDataSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn next_snapshot(&mut self) -> Result<MarketSnapshot> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AnalysisError::Source(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let snapshot: MarketSnapshot = serde_json::from_str(&raw)?;
        debug!(
            "Loaded snapshot from {} ({} bars)",
            self.path.display(),
            snapshot.price_history().len()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wraith-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_reads_snapshot() {
        let path = temp_path("read");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "price": 50000.0,
                "change_24h": 3.2,
                "high_24h": 51000.0,
                "low_24h": 48500.0,
                "volume_24h": 2.5e10,
                "market_cap": 9.8e11,
                "prices": [49000.0, 49500.0, 50000.0],
                "fundamental_score": 72.0,
                "observed_at": "2024-05-01T15:00:00Z"
            }}"#
        )
        .unwrap();

        let mut source = JsonFileSource::new(&path);
        let snapshot = source.next_snapshot().unwrap();
        assert_eq!(snapshot.price, 50_000.0);
        assert_eq!(snapshot.price_history().len(), 3);
        assert_eq!(snapshot.fundamental_score, Some(72.0));
        assert_eq!(snapshot.session_hour(), 15);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let mut source = JsonFileSource::new(temp_path("missing"));
        let err = source.next_snapshot().unwrap_err();
        assert!(matches!(err, AnalysisError::Source(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_malformed_json() {
        let path = temp_path("bad");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileSource::new(&path).next_snapshot().unwrap_err();
        assert!(matches!(err, AnalysisError::SerdeJson(_)));
        fs::remove_file(&path).ok();
    }
}
