//! Alerting: message composition and delivery sinks

pub mod compose;
pub mod notifier;

pub use compose::{compose_alert, AlertMessage};
pub use notifier::{AlertSink, LogNotifier, NotifierError, WebhookNotifier};
