//! Periscope probe harness
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - PERISCOPE_DATABASE: database whose profiling log to scan (required)
//! - PERISCOPE_THRESHOLD_MS: slow-operation threshold in ms (default: 100)
//! - PERISCOPE_CHECKPOINT_FILE: checkpoint path (default: periscope-checkpoint.json)
//! - PERISCOPE_ALERT_WEBHOOK: webhook URL for alerts (default: log only)
//! - PERISCOPE_SIMULATE: run against a seeded in-memory profiler (default: off)
//! - RUST_LOG: log level (default: info)
//!
//! The transport to a real monitored database is owned by the deployment:
//! implement `periscope::Profiler` over your driver and call
//! `periscope::run_probe` from your scheduler. This binary exercises the
//! full probe path against the built-in simulated profiler.

use std::process::ExitCode;

use periscope::alerts::{AlertSink, LogNotifier, NotifierError, WebhookNotifier};
use periscope::checkpoint::FileCheckpointStore;
use periscope::metrics::LogMetricSink;
use periscope::profile::{MemoryProfiler, ProfilingLevel};
use periscope::{run_probe, ProbeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

enum HarnessAlertSink {
    Log(LogNotifier),
    Webhook(WebhookNotifier),
}

impl AlertSink for HarnessAlertSink {
    async fn alert(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        match self {
            HarnessAlertSink::Log(sink) => sink.alert(subject, body).await,
            HarnessAlertSink::Webhook(sink) => sink.alert(subject, body).await,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "periscope=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProbeConfig::from_env();
    let checkpoint_path = std::env::var("PERISCOPE_CHECKPOINT_FILE")
        .unwrap_or_else(|_| "periscope-checkpoint.json".to_string());
    let webhook = std::env::var("PERISCOPE_ALERT_WEBHOOK").ok();
    let simulate = std::env::var("PERISCOPE_SIMULATE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    tracing::info!("Periscope configuration:");
    tracing::info!(
        "  Database: {}",
        if config.database.is_empty() {
            "(unset)"
        } else {
            config.database.as_str()
        }
    );
    tracing::info!("  Threshold: {} ms", config.threshold_millis);
    tracing::info!("  Checkpoint file: {}", checkpoint_path);
    tracing::info!(
        "  Alerts: {}",
        webhook.as_deref().unwrap_or("log only")
    );

    if !simulate {
        tracing::error!(
            "no monitored-system transport is built in; set PERISCOPE_SIMULATE=1 \
             to exercise the probe path, or embed periscope as a library with a \
             Profiler over your database driver"
        );
        return ExitCode::from(2);
    }

    tracing::info!("  Mode: SIMULATED profiler");
    let profiler = MemoryProfiler::new(ProfilingLevel::Off);
    profiler.seed_simulation(chrono::Utc::now());

    let checkpoints = FileCheckpointStore::new(&checkpoint_path);
    let metrics = LogMetricSink;
    let alerts = match webhook {
        Some(url) => HarnessAlertSink::Webhook(WebhookNotifier::new(url)),
        None => HarnessAlertSink::Log(LogNotifier),
    };

    match run_probe(&config, &profiler, &checkpoints, &metrics, &alerts).await {
        Ok(report) => {
            tracing::info!(
                new_slow_ops = report.new_slow_ops.len(),
                rate_per_minute = report.rate_per_minute,
                checkpoint = %report.checkpoint,
                "probe pass finished"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(error = %error, "probe pass failed");
            ExitCode::FAILURE
        }
    }
}
