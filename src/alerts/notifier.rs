//! Alert delivery sinks

use std::collections::HashMap;

/// Destination for composed alerts.
///
/// Invoked at most once per probe pass, only when new slow operations
/// were observed.
pub trait AlertSink {
    async fn alert(&self, subject: &str, body: &str) -> Result<(), NotifierError>;
}

/// Surfaces the alert as a warning event in the log
pub struct LogNotifier;

impl AlertSink for LogNotifier {
    async fn alert(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        tracing::warn!(subject = %subject, "slow-query alert:\n{}", body);
        Ok(())
    }
}

/// HTTP webhook sink posting the alert as a JSON payload
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    headers: HashMap<String, String>,
}

impl WebhookNotifier {
    /// Create a webhook sink for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Attach a header to every webhook request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

impl AlertSink for WebhookNotifier {
    async fn alert(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        let payload = serde_json::json!({
            "subject": subject,
            "body": body,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let mut request = self.client.post(&self.url).json(&payload);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifierError::Webhook(format!("Failed to send webhook: {}", e)))?;

        if !response.status().is_success() {
            return Err(NotifierError::Webhook(format!(
                "Webhook returned status {}",
                response.status()
            )));
        }

        tracing::debug!(url = %self.url, "webhook alert sent");
        Ok(())
    }
}

/// Alert delivery errors
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Webhook error: {0}")]
    Webhook(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_always_succeeds() {
        let result = LogNotifier.alert("subject", "body").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_webhook_failure_is_reported() {
        // Nothing listens on this port; delivery must surface an error.
        let sink = WebhookNotifier::new("http://127.0.0.1:1/hook");
        let result = sink.alert("subject", "body").await;
        assert!(matches!(result, Err(NotifierError::Webhook(_))));
    }
}
