//! User-facing notifications ("toasts").
//!
//! Stores report the outcome of each action through a [`Notifier`]. The call
//! is fire-and-forget: stores never look at what happens to a notification.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use authentic_wear_core::Severity;

/// Default capacity of the broadcast channel behind [`BroadcastNotifier`].
const DEFAULT_CAPACITY: usize = 64;

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    /// A success message stamped with the current time.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    /// An error message stamped with the current time.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Deliver a notification. Must not block and must not fail.
    fn notify(&self, notification: Notification);
}

/// Notifier that only writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                tracing::info!(text = %notification.message, "notification");
            }
            Severity::Error => {
                tracing::warn!(text = %notification.message, "notification");
            }
        }
    }
}

/// Notifier that fans notifications out to every UI subscriber.
///
/// Sending while nobody is subscribed is fine; the notification is dropped.
/// Slow subscribers that fall more than the channel capacity behind lose the
/// oldest notifications.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    /// Create a notifier with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a notifier with a specific channel capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to notifications sent from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            severity = %notification.severity,
            text = %notification.message,
            "notification"
        );
        // An error only means there are no subscribers right now.
        let _ = self.sender.send(notification);
    }
}
