//! Single-pass probe runner

use chrono::{DateTime, Utc};

use crate::alerts::{compose_alert, AlertSink};
use crate::checkpoint::{CheckpointError, CheckpointStore};
use crate::config::{ProbeConfig, PAGE_LIMIT};
use crate::metrics::MetricSink;
use crate::probe::rate::{clamped_elapsed_seconds, per_minute_rate};
use crate::profile::{ensure_capture, fetch_since, Profiler, ProfilerError, SlowOpRecord};

/// Outcome of one successful probe pass
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Newly observed slow operations, newest first, at most [`PAGE_LIMIT`]
    pub new_slow_ops: Vec<SlowOpRecord>,
    /// Wall-clock window covered by this pass, clamped to at least one second
    pub elapsed_seconds: f64,
    /// Slow operations per minute over the window
    pub rate_per_minute: f64,
    /// The checkpoint written at the end of the pass
    pub checkpoint: DateTime<Utc>,
}

/// Probe failure, surfaced to the operator
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Missing or invalid configuration; not retryable
    #[error("{0}")]
    Configuration(String),

    /// Failure communicating with the monitored system. The checkpoint is
    /// left untouched so the next invocation re-covers the same window.
    #[error("monitoring system error: {0}")]
    MonitoringSystem(#[from] ProfilerError),

    /// Checkpoint store failure. A read failure aborts the pass before
    /// the monitored system is touched; a write failure lands after the
    /// metric and any alert were already emitted, so the retried window
    /// gets reported a second time.
    #[error("checkpoint store error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

/// Run one probe pass with the current wall clock.
pub async fn run_probe<P, C, M, A>(
    config: &ProbeConfig,
    profiler: &P,
    checkpoints: &C,
    metrics: &M,
    alerts: &A,
) -> Result<ProbeReport, ProbeError>
where
    P: Profiler,
    C: CheckpointStore,
    M: MetricSink,
    A: AlertSink,
{
    run_probe_at(config, profiler, checkpoints, metrics, alerts, Utc::now()).await
}

/// Run one probe pass against an explicit `now`.
///
/// Sequence: validate the config, make sure slow-operation capture is on,
/// fetch the records since the checkpoint, report the rate, alert when
/// anything new was seen, then advance the checkpoint to `now`. `now` is
/// captured once by the caller, before the fetch; advancing to it rather
/// than to the newest record's timestamp means a clock disagreement with
/// the monitored system can only cause a boundary re-scan, never a gap.
///
/// Any failure before the final step leaves the checkpoint untouched. A
/// failure of the checkpoint write itself is the one non-clean exit: the
/// metric and alert were already emitted, so the next pass re-covers the
/// window and reports it again. An absent checkpoint defaults to `now`,
/// so the first pass ever reports zero new slow operations by design.
pub async fn run_probe_at<P, C, M, A>(
    config: &ProbeConfig,
    profiler: &P,
    checkpoints: &C,
    metrics: &M,
    alerts: &A,
    now: DateTime<Utc>,
) -> Result<ProbeReport, ProbeError>
where
    P: Profiler,
    C: CheckpointStore,
    M: MetricSink,
    A: AlertSink,
{
    if config.database.trim().is_empty() {
        return Err(ProbeError::Configuration(
            "A database name was not provided".to_string(),
        ));
    }

    let last_run_at = checkpoints.read()?.unwrap_or(now);

    ensure_capture(profiler).await?;

    let new_slow_ops =
        fetch_since(profiler, config.threshold_millis, last_run_at, PAGE_LIMIT).await?;

    let elapsed_seconds = clamped_elapsed_seconds(last_run_at, now);
    let rate_per_minute = per_minute_rate(new_slow_ops.len(), last_run_at, now);

    tracing::info!(
        database = %config.database,
        threshold_millis = config.threshold_millis,
        new_slow_ops = new_slow_ops.len(),
        elapsed_seconds,
        rate_per_minute,
        "slow-operation scan complete"
    );

    metrics.report(rate_per_minute);

    if !new_slow_ops.is_empty() {
        let message = compose_alert(&new_slow_ops);
        if let Err(error) = alerts.alert(&message.subject, &message.body).await {
            // Delivery failure does not abort the pass: re-covering the
            // window on retry would double-report the metric.
            tracing::error!(
                database = %config.database,
                error = %error,
                "failed to deliver slow-query alert"
            );
        }
    }

    checkpoints.write(now)?;

    Ok(ProbeReport {
        new_slow_ops,
        elapsed_seconds,
        rate_per_minute,
        checkpoint: now,
    })
}
