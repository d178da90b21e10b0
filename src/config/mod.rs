//! Probe configuration

use serde::{Deserialize, Serialize};

/// Maximum number of slow-operation records examined per probe pass.
///
/// Bounded-lookback constant: when more qualifying records than this have
/// accumulated since the checkpoint, only the newest `PAGE_LIMIT` are ever
/// seen. The rest are skipped permanently once the checkpoint advances.
pub const PAGE_LIMIT: usize = 20;

/// Threshold applied when none is configured, in milliseconds.
pub const DEFAULT_THRESHOLD_MILLIS: u64 = 100;

/// Probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Database whose profiling log is scanned
    pub database: String,
    /// Minimum operation duration considered slow, in milliseconds
    pub threshold_millis: u64,
}

impl ProbeConfig {
    /// Create a config with an explicit threshold
    pub fn new(database: impl Into<String>, threshold_millis: u64) -> Self {
        Self {
            database: database.into(),
            threshold_millis,
        }
    }

    /// Build a config from raw option text.
    ///
    /// The threshold text must parse as a non-negative integer; anything
    /// else (unset, empty, garbage) falls back to
    /// [`DEFAULT_THRESHOLD_MILLIS`]. The database name is trimmed but not
    /// validated here; the runner rejects an empty name before touching
    /// the monitored system.
    pub fn from_options(database: &str, threshold: Option<&str>) -> Self {
        Self {
            database: database.trim().to_string(),
            threshold_millis: parse_threshold(threshold),
        }
    }

    /// Build a config from environment variables:
    /// `PERISCOPE_DATABASE`, `PERISCOPE_THRESHOLD_MS`
    pub fn from_env() -> Self {
        let database = std::env::var("PERISCOPE_DATABASE").unwrap_or_default();
        let threshold = std::env::var("PERISCOPE_THRESHOLD_MS").ok();
        Self::from_options(&database, threshold.as_deref())
    }
}

fn parse_threshold(text: Option<&str>) -> u64 {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(|t| t.parse::<u64>().ok())
        .unwrap_or(DEFAULT_THRESHOLD_MILLIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults() {
        assert_eq!(parse_threshold(None), 100);
        assert_eq!(parse_threshold(Some("")), 100);
        assert_eq!(parse_threshold(Some("   ")), 100);
        assert_eq!(parse_threshold(Some("abc")), 100);
        assert_eq!(parse_threshold(Some("-5")), 100);
        assert_eq!(parse_threshold(Some("2.5")), 100);
    }

    #[test]
    fn test_threshold_parses_integers() {
        assert_eq!(parse_threshold(Some("250")), 250);
        assert_eq!(parse_threshold(Some(" 0 ")), 0);
    }

    #[test]
    fn test_from_options_trims_database() {
        let config = ProbeConfig::from_options("  orders  ", Some("50"));
        assert_eq!(config.database, "orders");
        assert_eq!(config.threshold_millis, 50);
    }
}
