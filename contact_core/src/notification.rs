//! Transient user-facing notifications

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// Background color used when the notification is rendered.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#10b981",
            Severity::Error => "#ef4444",
            Severity::Info => "#3b82f6",
            Severity::Warning => "#f59e0b",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Info => "info-circle",
            Severity::Warning => "exclamation-triangle",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, duration: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            duration,
            shown_at: Utc::now(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + chrono::Duration::milliseconds(self.duration.as_millis() as i64)
    }
}

/// Displays a dismissible message. A new call replaces whatever is visible.
pub trait NotificationSink: Send + Sync {
    fn show(&self, message: &str, severity: Severity, duration: Duration);
}

/// Keeps the visible notification plus everything shown so far.
#[derive(Clone, Default)]
pub struct MemoryNotifier {
    current: Arc<RwLock<Option<Notification>>>,
    history: Arc<RwLock<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The notification on screen, if it has not expired or been dismissed.
    pub fn current(&self) -> Option<Notification> {
        let current = self.current.read();
        current
            .as_ref()
            .filter(|n| n.expires_at() > Utc::now())
            .cloned()
    }

    pub fn last(&self) -> Option<Notification> {
        self.history.read().last().cloned()
    }

    pub fn history(&self) -> Vec<Notification> {
        self.history.read().clone()
    }

    pub fn dismiss(&self) {
        *self.current.write() = None;
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }
}

impl NotificationSink for MemoryNotifier {
    fn show(&self, message: &str, severity: Severity, duration: Duration) {
        let notification = Notification::new(message, severity, duration);
        self.history.write().push(notification.clone());
        *self.current.write() = Some(notification);
    }
}

/// Forwards notifications to the log at a level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn show(&self, message: &str, severity: Severity, duration: Duration) {
        let duration_ms = duration.as_millis() as u64;
        match severity {
            Severity::Error => tracing::error!(%severity, duration_ms, "{}", message),
            Severity::Warning => tracing::warn!(%severity, duration_ms, "{}", message),
            Severity::Success | Severity::Info => tracing::info!(%severity, duration_ms, "{}", message),
        }
    }
}
