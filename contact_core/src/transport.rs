//! HTTP exchange with the contact backend
//!
//! Every call resolves to a [`TransportOutcome`]. Callers branch on the
//! variant and never inspect error text.

use crate::error::Result;
use crate::models::{ContactRequest, ContactResponse};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    /// No response arrived within the bound; the request was abandoned.
    Timeout(Duration),
    /// The request failed before any response was observed.
    NetworkFailure(String),
    /// A response without a JSON body.
    HttpStatus { status: u16, body: String },
    /// A JSON body that decoded into the expected shape.
    Parsed { status: u16, response: ContactResponse },
    /// A body announced as JSON that could not be decoded.
    Malformed { status: u16, reason: String },
}

impl TransportOutcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportOutcome::HttpStatus { status, .. }
            | TransportOutcome::Parsed { status, .. }
            | TransportOutcome::Malformed { status, .. } => Some(*status),
            TransportOutcome::Timeout(_) | TransportOutcome::NetworkFailure(_) => None,
        }
    }
}

/// Raw JSON fetch result used by the health check.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Timeout(Duration),
    NetworkFailure(String),
    Response {
        status: u16,
        json: Option<serde_json::Value>,
    },
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn post_contact(
        &self,
        url: &str,
        request: &ContactRequest,
        timeout: Duration,
    ) -> TransportOutcome;

    async fn get_json(&self, url: &str, timeout: Duration) -> FetchOutcome;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("contact_core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn exchange(&self, url: &str, request: &ContactRequest) -> TransportOutcome {
        let response = match self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return TransportOutcome::NetworkFailure(describe(&err)),
        };

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);

        debug!(status, is_json, "Received response headers");

        if !is_json {
            return match response.text().await {
                Ok(body) => {
                    warn!(
                        status,
                        body = %preview(&body),
                        "Non-JSON response received"
                    );
                    TransportOutcome::HttpStatus { status, body }
                }
                Err(err) => TransportOutcome::NetworkFailure(describe(&err)),
            };
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return TransportOutcome::NetworkFailure(describe(&err)),
        };

        match serde_json::from_slice::<ContactResponse>(&bytes) {
            Ok(response) => TransportOutcome::Parsed { status, response },
            Err(err) => TransportOutcome::Malformed {
                status,
                reason: err.to_string(),
            },
        }
    }

    async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return FetchOutcome::NetworkFailure(describe(&err)),
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => FetchOutcome::Response {
                status,
                json: serde_json::from_slice(&bytes).ok(),
            },
            Err(err) => FetchOutcome::NetworkFailure(describe(&err)),
        }
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn post_contact(
        &self,
        url: &str,
        request: &ContactRequest,
        timeout: Duration,
    ) -> TransportOutcome {
        // Dropping the exchange future on expiry aborts the in-flight request.
        match tokio::time::timeout(timeout, self.exchange(url, request)).await {
            Ok(outcome) => outcome,
            Err(_) => TransportOutcome::Timeout(timeout),
        }
    }

    async fn get_json(&self, url: &str, timeout: Duration) -> FetchOutcome {
        match tokio::time::timeout(timeout, self.fetch(url)).await {
            Ok(outcome) => outcome,
            Err(_) => FetchOutcome::Timeout(timeout),
        }
    }
}

/// `application/json` or any `+json` structured suffix.
pub fn is_json_content_type(value: &str) -> bool {
    match value.parse::<mime::Mime>() {
        Ok(mime) => {
            mime.essence_str() == mime::APPLICATION_JSON.essence_str()
                || mime.suffix().map(|s| s == mime::JSON).unwrap_or(false)
        }
        Err(_) => false,
    }
}

fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));

        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("text/plain; charset=utf-8"));
        assert!(!is_json_content_type(""));
    }

    #[test]
    fn test_outcome_status() {
        assert_eq!(TransportOutcome::Timeout(Duration::from_secs(1)).status(), None);
        assert_eq!(
            TransportOutcome::HttpStatus { status: 502, body: String::new() }.status(),
            Some(502)
        );
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_CHARS);
    }
}
