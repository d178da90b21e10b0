//! Periscope: checkpointed slow-query probe
//!
//! A single-pass monitor for a database's slow-operation profiling log.
//! Each invocation fetches the records produced since the previous
//! successful run, reports a per-minute slow-query rate, raises an alert
//! when anything new was seen, and advances a persisted checkpoint. An
//! external scheduler invokes the probe on a cadence; the probe itself is
//! one strictly sequential pass with no internal concurrency.
//!
//! # Design points
//!
//! - **Checkpointed window**: the scan covers `[last_run_at, now]`; the
//!   checkpoint only advances after a fully successful pass, so failures
//!   make the next run re-cover the same window.
//! - **Bounded lookback**: at most [`PAGE_LIMIT`] records are examined
//!   per pass; a burst larger than that is deliberately truncated to the
//!   newest records and never revisited.
//! - **Self-sufficient capture**: the probe turns on slow-operation
//!   profiling if the monitored system has it off.
//! - **Explicit collaborators**: the monitored system, checkpoint store,
//!   metric sink, and alert sink are all traits injected by the caller.
//!
//! # Example
//!
//! ```no_run
//! use periscope::alerts::LogNotifier;
//! use periscope::checkpoint::MemoryCheckpointStore;
//! use periscope::metrics::CaptureMetricSink;
//! use periscope::profile::{MemoryProfiler, ProfilingLevel};
//! use periscope::{run_probe, ProbeConfig};
//!
//! # async fn demo() -> Result<(), periscope::ProbeError> {
//! let config = ProbeConfig::from_options("orders", Some("250"));
//! let profiler = MemoryProfiler::new(ProfilingLevel::SlowOnly);
//! let checkpoints = MemoryCheckpointStore::new();
//! let metrics = CaptureMetricSink::new();
//!
//! let report = run_probe(&config, &profiler, &checkpoints, &metrics, &LogNotifier).await?;
//! println!(
//!     "{} new slow ops, {:.1}/min",
//!     report.new_slow_ops.len(),
//!     report.rate_per_minute
//! );
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod checkpoint;
pub mod config;
pub mod metrics;
pub mod probe;
pub mod profile;

// Re-export commonly used types
pub use config::{ProbeConfig, DEFAULT_THRESHOLD_MILLIS, PAGE_LIMIT};
pub use probe::{run_probe, run_probe_at, ProbeError, ProbeReport};
pub use profile::{Profiler, ProfilerError, ProfilingLevel, SlowOpRecord};
