//! User-facing notifications.
//!
//! The manager reports every outcome through a [`Notifier`]. Delivery is
//! fire-and-forget: a notifier cannot fail or influence the operation.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity level.
    pub severity: Severity,
    /// Message shown to the user.
    pub message: String,
}

/// A sink for short user-facing messages.
pub trait Notifier: Send + Sync {
    /// Deliver a message.
    fn notify(&self, severity: Severity, message: &str);

    /// Deliver a success message.
    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    /// Deliver an error message.
    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

/// Emits notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => tracing::info!(target: "isain::notify", %message),
            Severity::Error => tracing::warn!(target: "isain::notify", %message),
        }
    }
}

/// Collects notifications in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.delivered.lock().clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.delivered.lock().last().cloned()
    }

    /// Number of notifications delivered.
    pub fn len(&self) -> usize {
        self.delivered.lock().len()
    }

    /// Returns true if nothing was delivered.
    pub fn is_empty(&self) -> bool {
        self.delivered.lock().is_empty()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.delivered.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.delivered.lock().push(Notification {
            severity,
            message: message.to_string(),
        });
    }
}
