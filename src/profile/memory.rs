//! In-memory profiler used by tests and the harness's simulation mode

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::{Profiler, ProfilerError, ProfilingLevel, SlowOpRecord};

/// In-memory stand-in for a real database profiler.
///
/// Holds records in insertion order and serves queries in natural order
/// descending with threshold filtering and a page limit, mirroring how a
/// profiling log is read. A deployment implements [`Profiler`] over its
/// own driver; this one backs unit tests and `PERISCOPE_SIMULATE=1`.
pub struct MemoryProfiler {
    inner: RwLock<Inner>,
}

struct Inner {
    level: ProfilingLevel,
    records: Vec<SlowOpRecord>,
    level_writes: usize,
    fail_next: Option<ProfilerError>,
}

impl MemoryProfiler {
    pub fn new(level: ProfilingLevel) -> Self {
        Self {
            inner: RwLock::new(Inner {
                level,
                records: Vec::new(),
                level_writes: 0,
                fail_next: None,
            }),
        }
    }

    /// Append a slow-operation record to the log
    pub fn record(&self, timestamp: DateTime<Utc>, duration_millis: f64, info: impl Into<String>) {
        self.inner.write().records.push(SlowOpRecord {
            timestamp,
            duration_millis,
            info: info.into(),
        });
    }

    /// Number of capture-level changes observed
    pub fn level_writes(&self) -> usize {
        self.inner.read().level_writes
    }

    /// Make the next profiler call fail with `error`
    pub fn fail_next(&self, error: ProfilerError) {
        self.inner.write().fail_next = Some(error);
    }

    /// Seed a synthetic burst of slow operations ending at `now`
    pub fn seed_simulation(&self, now: DateTime<Utc>) {
        for i in (0..6).rev() {
            self.record(
                now - Duration::seconds(i * 7),
                130.0 + (i as f64) * 45.0,
                format!(
                    "query orders.system.profile nscanned:{} collection scan",
                    1200 + i * 300
                ),
            );
        }
    }

    fn take_failure(&self) -> Result<(), ProfilerError> {
        match self.inner.write().fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Profiler for MemoryProfiler {
    async fn profiling_level(&self) -> Result<ProfilingLevel, ProfilerError> {
        self.take_failure()?;
        Ok(self.inner.read().level)
    }

    async fn set_profiling_level(&self, level: ProfilingLevel) -> Result<(), ProfilerError> {
        self.take_failure()?;
        let mut inner = self.inner.write();
        inner.level = level;
        inner.level_writes += 1;
        Ok(())
    }

    async fn slow_ops(
        &self,
        min_duration_millis: u64,
        limit: usize,
    ) -> Result<Vec<SlowOpRecord>, ProfilerError> {
        self.take_failure()?;
        let inner = self.inner.read();
        Ok(inner
            .records
            .iter()
            .rev()
            .filter(|r| r.duration_millis >= min_duration_millis as f64)
            .take(limit)
            .cloned()
            .collect())
    }
}
