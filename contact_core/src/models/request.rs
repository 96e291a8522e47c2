//! Outgoing contact payload and the raw form snapshot it is built from

use serde::{Deserialize, Serialize};

/// Field values exactly as typed, before trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl RawFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// Body posted to the contact endpoint. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    /// Trims every field. Validation happens separately.
    pub fn from_raw(raw: &RawFields) -> Self {
        Self {
            name: raw.name.trim().to_string(),
            email: raw.email.trim().to_string(),
            message: raw.message.trim().to_string(),
        }
    }
}
