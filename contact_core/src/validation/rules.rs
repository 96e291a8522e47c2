//! Field rules for the contact form

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

pub fn validate_name(name: &str, min_chars: usize) -> Result<(), ValidationError> {
    if name.chars().count() < min_chars {
        return Err(rule_error(
            "name_length",
            format!("Name must be at least {} characters", min_chars),
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || !EMAIL_REGEX.is_match(email) {
        return Err(rule_error(
            "email_format",
            "Please enter a valid email address".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_message(message: &str, min_chars: usize) -> Result<(), ValidationError> {
    if message.chars().count() < min_chars {
        return Err(rule_error(
            "message_length",
            format!("Message must be at least {} characters", min_chars),
        ));
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(is_valid_email("a@b.c"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@.com"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        assert!(validate_name("Al", 2).is_ok());
        assert!(validate_name("É", 2).is_err());
        assert!(validate_name("Éa", 2).is_ok());
        assert!(validate_name("", 2).is_err());
    }

    #[test]
    fn test_message_length() {
        assert!(validate_message("0123456789", 10).is_ok());
        assert!(validate_message("012345678", 10).is_err());

        let err = validate_message("short", 10).unwrap_err();
        assert_eq!(err.code, "message_length");
        assert_eq!(err.message.as_deref(), Some("Message must be at least 10 characters"));
    }

    #[test]
    fn test_email_error_code() {
        let err = validate_email("not-an-email").unwrap_err();
        assert_eq!(err.code, "email_format");
    }
}
