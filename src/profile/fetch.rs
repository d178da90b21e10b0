//! Incremental fetch of slow operations since the last checkpoint

use chrono::{DateTime, Utc};

use super::{Profiler, ProfilerError, SlowOpRecord};

/// Fetch the slow operations recorded since `checkpoint`.
///
/// Asks the profiler for the newest `page_limit` records at or above
/// `threshold_millis` and keeps the prefix with `timestamp >= checkpoint`,
/// newest first. A record stamped exactly at the checkpoint is included.
///
/// Bounded lookback: when more than `page_limit` qualifying records exist
/// in the window, only the newest `page_limit` are returned. The older
/// ones are dropped from the count and the alert, and are never revisited
/// because the checkpoint advances past them on success. That is a
/// deliberate bounded-cost tradeoff, not a bug.
pub async fn fetch_since<P: Profiler>(
    profiler: &P,
    threshold_millis: u64,
    checkpoint: DateTime<Utc>,
    page_limit: usize,
) -> Result<Vec<SlowOpRecord>, ProfilerError> {
    let page = profiler.slow_ops(threshold_millis, page_limit).await?;

    let mut fresh = Vec::new();
    for record in page {
        if record.timestamp < checkpoint {
            break;
        }
        fresh.push(record);
    }

    Ok(fresh)
}
