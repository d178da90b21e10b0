//! Alert message composition

use crate::profile::SlowOpRecord;

/// A composed alert: subject line plus body
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

/// Build the alert for a batch of newly observed slow operations.
///
/// Meant for non-empty input; the body lists records in the order given
/// (newest first, as fetched), one block per record: a line with the
/// duration and timestamp, the raw profiler `info` text, then a blank
/// line. Pure.
pub fn compose_alert(records: &[SlowOpRecord]) -> AlertMessage {
    let noun = if records.len() == 1 { "query" } else { "queries" };
    let subject = format!("Maximum Query Time exceeded on {} {}", records.len(), noun);

    let mut body = String::new();
    for record in records {
        body.push_str(&format!(
            "{} ms query on {}:\n",
            record.duration_millis,
            record.timestamp.to_rfc3339()
        ));
        body.push_str(&record.info);
        body.push_str("\n\n");
    }

    AlertMessage { subject, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(age_secs: i64, duration_millis: f64, info: &str) -> SlowOpRecord {
        SlowOpRecord {
            timestamp: Utc::now() - Duration::seconds(age_secs),
            duration_millis,
            info: info.to_string(),
        }
    }

    #[test]
    fn test_subject_pluralizes() {
        let one = compose_alert(&[record(1, 150.0, "a")]);
        assert_eq!(one.subject, "Maximum Query Time exceeded on 1 query");

        let three = compose_alert(&[
            record(1, 150.0, "a"),
            record(2, 150.0, "b"),
            record(3, 150.0, "c"),
        ]);
        assert_eq!(three.subject, "Maximum Query Time exceeded on 3 queries");
    }

    #[test]
    fn test_body_preserves_order_and_layout() {
        let newest = record(1, 312.0, "query orders find");
        let oldest = record(9, 150.5, "query users update");
        let message = compose_alert(&[newest.clone(), oldest.clone()]);

        let first = body_index(&message.body, "query orders find");
        let second = body_index(&message.body, "query users update");
        assert!(first < second);

        assert!(message.body.starts_with(&format!(
            "312 ms query on {}:\nquery orders find\n\n",
            newest.timestamp.to_rfc3339()
        )));
        assert!(message.body.ends_with("\n\n"));
        assert!(message.body.contains("150.5 ms query on"));
    }

    fn body_index(body: &str, needle: &str) -> usize {
        body.find(needle).expect("record info missing from body")
    }
}
