//! Monitored-system boundary: profiling records, capture levels, and the
//! [`Profiler`] trait

pub mod fetch;
pub mod gate;
pub mod memory;

pub use fetch::fetch_since;
pub use gate::ensure_capture;
pub use memory::MemoryProfiler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One slow-operation record read from the profiling log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowOpRecord {
    /// When the operation was recorded
    pub timestamp: DateTime<Utc>,
    /// Execution time in milliseconds (the source reports fractional values)
    pub duration_millis: f64,
    /// Raw description of the operation from the profiler
    pub info: String,
}

/// Capture level of the monitored system's profiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilingLevel {
    /// Nothing is recorded
    Off,
    /// Only operations at or above the system's own slow-operation floor
    SlowOnly,
    /// Every operation is recorded
    All,
}

/// Failure communicating with the monitored system
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfilerError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("profiling query failed: {0}")]
    Query(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

/// Handle to the monitored database's profiler.
///
/// Implementations are supplied by the surrounding deployment over its
/// database driver; [`MemoryProfiler`] backs tests and simulation mode.
pub trait Profiler {
    /// Current capture level
    async fn profiling_level(&self) -> Result<ProfilingLevel, ProfilerError>;

    /// Change the capture level
    async fn set_profiling_level(&self, level: ProfilingLevel) -> Result<(), ProfilerError>;

    /// The newest records with `duration_millis >= min_duration_millis`,
    /// in natural insertion order descending, at most `limit` of them.
    async fn slow_ops(
        &self,
        min_duration_millis: u64,
        limit: usize,
    ) -> Result<Vec<SlowOpRecord>, ProfilerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(ProfilingLevel::Off < ProfilingLevel::SlowOnly);
        assert!(ProfilingLevel::SlowOnly < ProfilingLevel::All);
    }
}
