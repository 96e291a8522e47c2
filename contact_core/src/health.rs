//! Backend reachability check

use crate::config::ContactConfig;
use crate::models::HealthPayload;
use crate::notification::{NotificationSink, Severity};
use crate::transport::{ContactTransport, FetchOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const UNSTABLE_BACKEND_WARNING: &str =
    "Backend connection unstable. Messages may not be delivered.";

pub const CHECKING_BACKEND_NOTICE: &str = "Checking backend connection...";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: HealthStatus,
    pub message: String,
    pub environment: Option<String>,
    pub email_configured: Option<bool>,
    pub uptime: Option<f64>,
    pub response_time_ms: u64,
    pub checked_at: DateTime<Utc>,
}

impl BackendHealth {
    pub fn healthy(payload: HealthPayload, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: payload.message.unwrap_or_else(|| "OK".to_string()),
            environment: payload.environment,
            email_configured: payload.email_configured,
            uptime: payload.uptime,
            response_time_ms,
            checked_at: Utc::now(),
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message,
            environment: None,
            email_configured: None,
            uptime: None,
            response_time_ms,
            checked_at: Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[derive(Clone)]
pub struct HealthMonitor {
    url: String,
    timeout: Duration,
    notice_duration: Duration,
    warning_duration: Duration,
    transport: Arc<dyn ContactTransport>,
}

impl HealthMonitor {
    pub fn new(config: &ContactConfig, transport: Arc<dyn ContactTransport>) -> Self {
        Self {
            url: config.endpoint.health_url.clone(),
            timeout: config.endpoint.health_timeout(),
            notice_duration: Duration::from_millis(config.notifications.info_ms),
            warning_duration: Duration::from_millis(config.notifications.warning_ms),
            transport,
        }
    }

    pub async fn check(&self) -> BackendHealth {
        let start = Instant::now();
        let outcome = self.transport.get_json(&self.url, self.timeout).await;
        let elapsed = start.elapsed().as_millis() as u64;

        let health = match outcome {
            FetchOutcome::Response { status, json: Some(json) } if (200..300).contains(&status) => {
                let payload = serde_json::from_value::<HealthPayload>(json).unwrap_or_default();
                BackendHealth::healthy(payload, elapsed)
            }
            FetchOutcome::Response { status, json: None } if (200..300).contains(&status) => {
                BackendHealth::unhealthy("Health endpoint returned a non-JSON body".to_string(), elapsed)
            }
            FetchOutcome::Response { status, .. } => {
                BackendHealth::unhealthy(format!("Backend responded with status: {}", status), elapsed)
            }
            FetchOutcome::Timeout(after) => {
                BackendHealth::unhealthy(format!("Health check timed out after {:?}", after), elapsed)
            }
            FetchOutcome::NetworkFailure(reason) => {
                BackendHealth::unhealthy(format!("Backend connection test failed: {}", reason), elapsed)
            }
        };

        if health.is_healthy() {
            info!(
                environment = ?health.environment,
                email_configured = ?health.email_configured,
                uptime = ?health.uptime,
                response_time_ms = health.response_time_ms,
                "Backend health check: {}",
                health.message
            );
            if health.email_configured == Some(false) {
                warn!("Email service not configured on backend; messages will be logged only");
            }
        } else {
            warn!(url = %self.url, "Backend health check failed: {}", health.message);
        }

        health
    }

    /// Runs a check and shows a warning notification when the backend is down.
    pub async fn warn_if_unhealthy(&self, notifier: &dyn NotificationSink) -> BackendHealth {
        let health = self.check().await;
        if !health.is_healthy() {
            notifier.show(UNSTABLE_BACKEND_WARNING, Severity::Warning, self.warning_duration);
        }
        health
    }

    /// Announces the check with an info notification, then runs
    /// [`HealthMonitor::warn_if_unhealthy`].
    pub async fn check_with_notice(&self, notifier: &dyn NotificationSink) -> BackendHealth {
        notifier.show(CHECKING_BACKEND_NOTICE, Severity::Info, self.notice_duration);
        self.warn_if_unhealthy(notifier).await
    }
}
