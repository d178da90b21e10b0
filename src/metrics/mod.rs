//! Metric reporting sink

use parking_lot::Mutex;

/// Destination for the computed slow-query rate.
///
/// Called exactly once per probe pass. A zero rate is reported too; the
/// absence of slow queries is itself a signal.
pub trait MetricSink {
    fn report(&self, rate_per_minute: f64);
}

/// Emits the rate as a structured tracing event
pub struct LogMetricSink;

impl MetricSink for LogMetricSink {
    fn report(&self, rate_per_minute: f64) {
        tracing::info!(
            metric = "slow_queries_per_minute",
            value = rate_per_minute,
            "metric"
        );
    }
}

/// Collects reported rates in memory, oldest first
#[derive(Default)]
pub struct CaptureMetricSink {
    rates: Mutex<Vec<f64>>,
}

impl CaptureMetricSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rates reported so far
    pub fn rates(&self) -> Vec<f64> {
        self.rates.lock().clone()
    }
}

impl MetricSink for CaptureMetricSink {
    fn report(&self, rate_per_minute: f64) {
        self.rates.lock().push(rate_per_minute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sink_records_in_order() {
        let sink = CaptureMetricSink::new();
        sink.report(6.0);
        sink.report(0.0);
        assert_eq!(sink.rates(), vec![6.0, 0.0]);
    }
}
