//! Bodies returned by the contact backend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl ContactResponse {
    /// Best available explanation of an application-level failure.
    pub fn failure_message(&self) -> String {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }

        if let Some(error) = self.error.as_deref().filter(|e| !e.trim().is_empty()) {
            return error.to_string();
        }

        match &self.errors {
            Some(errors) if !errors.is_empty() => errors.join("; "),
            _ => "Failed to send message".to_string(),
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.clone().unwrap_or_default()
    }
}

/// Health endpoint body. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPayload {
    pub message: Option<String>,
    pub environment: Option<String>,
    pub email_configured: Option<bool>,
    pub uptime: Option<f64>,
}
