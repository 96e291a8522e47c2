use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use contact_core::{
    health::{CHECKING_BACKEND_NOTICE, UNSTABLE_BACKEND_WARNING},
    ContactConfig, ContactTransport, HealthMonitor, HealthStatus, HttpTransport, MemoryNotifier,
    Severity,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn healthy() -> impl IntoResponse {
    Json(json!({
        "message": "Portfolio backend is running",
        "environment": "production",
        "emailConfigured": true,
        "uptime": 1234.5,
    }))
}

async fn unavailable() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "waking up")
}

async fn sleepy() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(10)).await;
    Json(json!({"message": "late"}))
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/health", get(healthy))
        .route("/down", get(unavailable))
        .route("/sleepy", get(sleepy));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn monitor(health_url: String) -> HealthMonitor {
    let mut config = ContactConfig::default();
    config.endpoint.health_url = health_url;
    config.endpoint.health_timeout_seconds = 1;
    let transport: Arc<dyn ContactTransport> = Arc::new(HttpTransport::new().unwrap());
    HealthMonitor::new(&config, transport)
}

#[tokio::test]
async fn test_healthy_backend() {
    let addr = spawn_backend().await;
    let monitor = monitor(format!("http://{}/api/health", addr));
    let notifier = MemoryNotifier::new();

    let health = monitor.warn_if_unhealthy(&notifier).await;

    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.message, "Portfolio backend is running");
    assert_eq!(health.environment.as_deref(), Some("production"));
    assert_eq!(health.email_configured, Some(true));
    assert!(notifier.history().is_empty());
}

#[tokio::test]
async fn test_unhealthy_status_shows_warning() {
    let addr = spawn_backend().await;
    let monitor = monitor(format!("http://{}/down", addr));
    let notifier = MemoryNotifier::new();

    let health = monitor.warn_if_unhealthy(&notifier).await;

    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert!(health.message.contains("503"));

    let warning = notifier.last().unwrap();
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.message, UNSTABLE_BACKEND_WARNING);
    assert_eq!(warning.duration, Duration::from_millis(5000));
}

#[tokio::test]
async fn test_slow_health_endpoint_times_out() {
    let addr = spawn_backend().await;
    let monitor = monitor(format!("http://{}/sleepy", addr));

    let health = monitor.check().await;

    assert!(!health.is_healthy());
    assert!(health.message.contains("timed out"));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let monitor = monitor(format!("http://{}/api/health", addr));
    let health = monitor.check().await;

    assert!(!health.is_healthy());
    assert!(health.message.starts_with("Backend connection test failed"));
}

#[tokio::test]
async fn test_notice_precedes_check() {
    let addr = spawn_backend().await;
    let notifier = MemoryNotifier::new();

    let health = monitor(format!("http://{}/api/health", addr))
        .check_with_notice(&notifier)
        .await;

    assert!(health.is_healthy());
    let history = notifier.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, CHECKING_BACKEND_NOTICE);
    assert_eq!(history[0].severity, Severity::Info);
    assert_eq!(history[0].duration, Duration::from_millis(2000));
}

#[tokio::test]
async fn test_notice_then_warning_when_down() {
    let addr = spawn_backend().await;
    let notifier = MemoryNotifier::new();

    monitor(format!("http://{}/down", addr))
        .check_with_notice(&notifier)
        .await;

    let severities: Vec<Severity> = notifier.history().iter().map(|n| n.severity).collect();
    assert_eq!(severities, vec![Severity::Info, Severity::Warning]);
    assert_eq!(notifier.current().unwrap().message, UNSTABLE_BACKEND_WARNING);
}
