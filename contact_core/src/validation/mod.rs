//! Local checks run before anything is sent

pub mod rules;

pub use rules::*;

use crate::config::FormConfig;
use crate::error::ContactError;
use crate::models::ContactRequest;
use validator::ValidationError;

/// Minimum lengths applied to a contact request, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactRules {
    pub name_min_chars: usize,
    pub message_min_chars: usize,
}

impl Default for ContactRules {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_min_chars: 10,
        }
    }
}

impl From<&FormConfig> for ContactRules {
    fn from(form: &FormConfig) -> Self {
        Self {
            name_min_chars: form.name_min_chars,
            message_min_chars: form.message_min_chars,
        }
    }
}

/// Checks name, then email, then message, and stops at the first violation.
pub fn validate_contact_request(
    request: &ContactRequest,
    rules: &ContactRules,
) -> Result<(), ContactError> {
    validate_name(&request.name, rules.name_min_chars).map_err(|e| into_contact_error("name", e))?;
    validate_email(&request.email).map_err(|e| into_contact_error("email", e))?;
    validate_message(&request.message, rules.message_min_chars)
        .map_err(|e| into_contact_error("message", e))?;
    Ok(())
}

fn into_contact_error(field: &str, error: ValidationError) -> ContactError {
    let reason = error
        .message
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
    ContactError::validation(field, reason)
}
