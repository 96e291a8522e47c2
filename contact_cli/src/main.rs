//! Terminal host for the contact form client

use anyhow::Result;
use clap::{Parser, Subcommand};
use contact_core::{
    http_submitter, ContactConfig, ContactTransport, HealthMonitor, HttpTransport, MemoryForm,
    NotificationSink, RawFields, Severity, SubmissionOutcome, TracingNotifier,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// contact — send a message through a portfolio contact endpoint
#[derive(Parser)]
#[command(name = "contact", version, about, long_about = None)]
struct Cli {
    /// Configuration file; defaults to ./contact.toml when present.
    #[arg(long, short, env = "CONTACT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and submit one contact message.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Check the health endpoint first and warn if it is down.
        #[arg(long)]
        check_health: bool,
    },

    /// Check the backend health endpoint.
    Health,
}

/// Prints notifications to stderr, one line each.
struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn show(&self, message: &str, severity: Severity, _duration: Duration) {
        let marker = match severity {
            Severity::Success => "✔",
            Severity::Error => "✖",
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
        };
        eprintln!("{} [{}] {}", marker, severity, message);
    }
}

/// Structured log output gets notifications as log events; otherwise they
/// go to the terminal.
fn notifier_for(json_logs: bool) -> Arc<dyn NotificationSink> {
    if json_logs {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(TerminalNotifier)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let json_logs = log_format_is_json();
    init_tracing(json_logs);

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ContactConfig::load_from(path),
        None => ContactConfig::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Contact endpoint: {}", config.endpoint.url);

    match cli.command {
        Command::Send {
            name,
            email,
            message,
            check_health,
        } => {
            let notifier = notifier_for(json_logs);

            if check_health {
                let transport: Arc<dyn ContactTransport> = Arc::new(HttpTransport::new()?);
                HealthMonitor::new(&config, transport)
                    .check_with_notice(notifier.as_ref())
                    .await;
            }

            let form = MemoryForm::with_values(RawFields::new(name, email, message));
            let submitter = http_submitter(config, Arc::new(form), notifier)
                .map_err(|e| anyhow::anyhow!("Failed to initialize submitter: {}", e))?;

            let outcome = submitter.submit_form().await;
            info!(outcome = outcome.kind(), "Submission finished");

            Ok(match outcome {
                SubmissionOutcome::Delivered { .. } => ExitCode::SUCCESS,
                SubmissionOutcome::Failed(err) if !err.is_retryable() => ExitCode::from(2),
                SubmissionOutcome::Failed(_) => ExitCode::FAILURE,
            })
        }
        Command::Health => {
            let transport: Arc<dyn ContactTransport> = Arc::new(HttpTransport::new()?);
            let health = HealthMonitor::new(&config, transport).check().await;

            println!("{}", render_health(&health));

            Ok(if health.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn render_health(health: &contact_core::BackendHealth) -> String {
    format!(
        "status: {}\nmessage: {}\nenvironment: {}\nemail configured: {}\nresponse time: {} ms",
        health.status,
        health.message,
        health.environment.as_deref().unwrap_or("unknown"),
        health
            .email_configured
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        health.response_time_ms
    )
}

fn is_json_format(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("json")
}

fn log_format_is_json() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| is_json_format(&v))
        .unwrap_or(false)
}

fn init_tracing(is_json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

        format!(
            "{}={},contact_core={},reqwest=warn",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            default_level,
            default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
