//! Probe orchestration: rate computation and the single-pass runner

pub mod rate;
pub mod runner;

pub use rate::{clamped_elapsed_seconds, per_minute_rate};
pub use runner::{run_probe, run_probe_at, ProbeError, ProbeReport};
