//! Contact submission error types and handling

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContactError>;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Validation error on {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status}")]
    Server { status: u16 },

    #[error("Rejected by server: {message}")]
    Rejected { message: String, errors: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ContactError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        ContactError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable label for logs and exit reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            ContactError::Validation { .. } => "validation",
            ContactError::Timeout(_) => "timeout",
            ContactError::Network(_) => "network",
            ContactError::Server { .. } => "server",
            ContactError::Rejected { .. } => "rejected",
            ContactError::Config(_) => "config",
            ContactError::Http(_) => "http",
        }
    }

    /// Text shown to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            ContactError::Validation { reason, .. } => reason.clone(),
            ContactError::Timeout(_) => {
                "Failed to send message. Request timeout. The server is taking too long to respond."
                    .to_string()
            }
            ContactError::Network(_) => {
                "Failed to send message. Cannot connect to server. Check your internet connection and try again."
                    .to_string()
            }
            ContactError::Server { status } => {
                format!("Failed to send message. Server error: {}", status)
            }
            ContactError::Rejected { message, .. } => message.clone(),
            ContactError::Config(err) => {
                tracing::error!("Configuration error: {}", err);
                "Failed to send message. The contact form is misconfigured.".to_string()
            }
            ContactError::Http(err) => {
                tracing::error!("HTTP client error: {:?}", err);
                format!("Failed to send message. {}", err)
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContactError::Timeout(_)
                | ContactError::Network(_)
                | ContactError::Server { .. }
                | ContactError::Rejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(ContactError::validation("name", "too short").kind(), "validation");
        assert_eq!(ContactError::Timeout(Duration::from_secs(15)).kind(), "timeout");
        assert_eq!(ContactError::Network("refused".to_string()).kind(), "network");
        assert_eq!(ContactError::Server { status: 502 }.kind(), "server");
    }

    #[test]
    fn test_user_messages() {
        let err = ContactError::validation("message", "Message must be at least 10 characters");
        assert_eq!(err.user_message(), "Message must be at least 10 characters");

        let err = ContactError::Server { status: 503 };
        assert!(err.user_message().contains("503"));

        let err = ContactError::Timeout(Duration::from_secs(10));
        assert!(err.user_message().contains("timeout"));

        let err = ContactError::Network("dns failure".to_string());
        assert!(err.user_message().contains("Cannot connect"));
    }

    #[test]
    fn test_config_errors_convert() {
        let err: ContactError = config::ConfigError::Message("Endpoint URL cannot be empty".to_string()).into();
        assert_eq!(err.kind(), "config");
        assert!(!err.is_retryable());
        assert!(err.user_message().contains("misconfigured"));
    }

    #[test]
    fn test_validation_is_not_retryable() {
        assert!(!ContactError::validation("email", "bad").is_retryable());
        assert!(ContactError::Server { status: 500 }.is_retryable());
    }
}
