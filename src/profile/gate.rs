//! Profiling gate: make sure the monitored system is capturing slow
//! operations before anything is fetched

use super::{Profiler, ProfilerError, ProfilingLevel};

/// Ensure slow-operation capture is enabled.
///
/// If the capture level is `Off`, raise it to `SlowOnly` (the monitored
/// system's own capture floor, independent of the probe threshold). Levels
/// at or above `SlowOnly` are left alone, so the probe never downgrades a
/// system already profiling everything. Without this step a freshly
/// provisioned database would silently produce empty scans forever.
pub async fn ensure_capture<P: Profiler>(profiler: &P) -> Result<(), ProfilerError> {
    let level = profiler.profiling_level().await?;

    if level == ProfilingLevel::Off {
        tracing::info!("profiling was off, enabling slow-operation capture");
        profiler.set_profiling_level(ProfilingLevel::SlowOnly).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MemoryProfiler;

    #[tokio::test]
    async fn test_enables_capture_when_off() {
        let profiler = MemoryProfiler::new(ProfilingLevel::Off);

        ensure_capture(&profiler).await.unwrap();

        assert_eq!(
            profiler.profiling_level().await.unwrap(),
            ProfilingLevel::SlowOnly
        );
        assert_eq!(profiler.level_writes(), 1);
    }

    #[tokio::test]
    async fn test_noop_when_already_capturing() {
        let profiler = MemoryProfiler::new(ProfilingLevel::SlowOnly);
        ensure_capture(&profiler).await.unwrap();
        assert_eq!(profiler.level_writes(), 0);
    }

    #[tokio::test]
    async fn test_never_downgrades_full_capture() {
        let profiler = MemoryProfiler::new(ProfilingLevel::All);

        ensure_capture(&profiler).await.unwrap();

        assert_eq!(profiler.profiling_level().await.unwrap(), ProfilingLevel::All);
        assert_eq!(profiler.level_writes(), 0);
    }

    #[tokio::test]
    async fn test_propagates_profiler_errors() {
        let profiler = MemoryProfiler::new(ProfilingLevel::Off);
        profiler.fail_next(ProfilerError::Connection("refused".to_string()));

        let result = ensure_capture(&profiler).await;
        assert!(matches!(result, Err(ProfilerError::Connection(_))));
    }
}
