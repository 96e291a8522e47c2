use config::{Config, ConfigError, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "contact.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub endpoint: EndpointConfig,
    pub form: FormConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    pub health_url: String,
    pub timeout_seconds: u64,
    pub health_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub name_min_chars: usize,
    pub message_min_chars: usize,
    pub sending_label: String,
}

/// Display durations, in milliseconds, per notification purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub validation_ms: u64,
    pub success_ms: u64,
    pub rejected_ms: u64,
    pub failure_ms: u64,
    pub warning_ms: u64,
    pub info_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            form: FormConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000/api/contact/send".to_string(),
            health_url: "http://127.0.0.1:5000/api/health".to_string(),
            timeout_seconds: 15,
            health_timeout_seconds: 5,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_min_chars: 10,
            sending_label: "Sending...".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            validation_ms: 3000,
            success_ms: 5000,
            rejected_ms: 4000,
            failure_ms: 6000,
            warning_ms: 5000,
            info_ms: 2000,
        }
    }
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_seconds)
    }
}

impl ContactConfig {
    /// Defaults, then `contact.toml` in the working directory if present,
    /// then `CONTACT_*` environment variables (`__` separates sections).
    pub fn load() -> Result<Self, ConfigError> {
        let file = Path::new(DEFAULT_CONFIG_FILE);
        if file.exists() {
            Self::build(Some(file))
        } else {
            Self::build(None)
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&ContactConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("CONTACT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let contact_config: ContactConfig = config.try_deserialize()?;

        contact_config.validate()?;

        Ok(contact_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = parse_http_url("Endpoint URL", &self.endpoint.url)?;
        parse_http_url("Health URL", &self.endpoint.health_url)?;

        if self.endpoint.timeout_seconds == 0 || self.endpoint.timeout_seconds > 120 {
            return Err(ConfigError::Message(
                "Request timeout must be between 1 and 120 seconds".to_string(),
            ));
        }

        if self.endpoint.health_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Health check timeout must be greater than 0".to_string(),
            ));
        }

        if self.form.name_min_chars == 0 || self.form.message_min_chars == 0 {
            return Err(ConfigError::Message(
                "Minimum field lengths must be greater than 0".to_string(),
            ));
        }

        if self.form.sending_label.trim().is_empty() {
            return Err(ConfigError::Message(
                "Sending label cannot be empty".to_string(),
            ));
        }

        let n = &self.notifications;
        if [n.validation_ms, n.success_ms, n.rejected_ms, n.failure_ms, n.warning_ms, n.info_ms]
            .contains(&0)
        {
            return Err(ConfigError::Message(
                "Notification durations must be greater than 0".to_string(),
            ));
        }

        if endpoint.scheme() == "http" && !is_loopback(&endpoint) {
            tracing::warn!("Contact endpoint is not using TLS: {}", self.endpoint.url);
        }

        Ok(())
    }
}

fn parse_http_url(label: &str, raw: &str) -> Result<Url, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::Message(format!("{} cannot be empty", label)));
    }

    let url = Url::parse(raw)
        .map_err(|e| ConfigError::Message(format!("{} is not a valid URL ({}): {}", label, e, raw)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Message(format!(
            "{} must use http or https: {}",
            label, raw
        )));
    }

    if url.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(ConfigError::Message(format!("{} has no host: {}", label, raw)));
    }

    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContactConfig::default();
        assert_eq!(config.endpoint.timeout_seconds, 15);
        assert_eq!(config.endpoint.timeout(), Duration::from_secs(15));
        assert_eq!(config.form.name_min_chars, 2);
        assert_eq!(config.form.message_min_chars, 10);
        assert_eq!(config.form.sending_label, "Sending...");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ContactConfig::default();

        config.endpoint.url = String::new();
        assert!(config.validate().is_err());

        config = ContactConfig::default();
        config.endpoint.url = "ftp://example.com/contact".to_string();
        assert!(config.validate().is_err());

        config = ContactConfig::default();
        config.endpoint.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config = ContactConfig::default();
        config.endpoint.timeout_seconds = 600;
        assert!(config.validate().is_err());

        config = ContactConfig::default();
        config.form.sending_label = "   ".to_string();
        assert!(config.validate().is_err());

        config = ContactConfig::default();
        config.notifications.failure_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparsable_urls_are_rejected() {
        let mut config = ContactConfig::default();
        config.endpoint.url = "http://exa mple.com/api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Endpoint URL is not a valid URL"));

        config = ContactConfig::default();
        config.endpoint.health_url = "http://exa mple.com/health".to_string();
        assert!(config.validate().is_err());

        config = ContactConfig::default();
        config.endpoint.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_loopback_detection() {
        let loopback = |raw: &str| is_loopback(&Url::parse(raw).unwrap());

        assert!(loopback("http://127.0.0.1:5000/api"));
        assert!(loopback("http://localhost/api"));
        assert!(loopback("http://[::1]:8080/api"));
        assert!(!loopback("http://example.com/api"));
        assert!(!loopback("http://localhost.evil.com/api"));
        assert!(!loopback("http://127.0.0.1.nip.io/api"));
    }

    #[test]
    fn test_environment_variable_support() {
        std::env::set_var("CONTACT_FORM__SENDING_LABEL", "Transmitting");

        let config = ContactConfig::load().expect("Should load configuration");
        assert_eq!(config.form.sending_label, "Transmitting");
        assert!(config.validate().is_ok());

        std::env::remove_var("CONTACT_FORM__SENDING_LABEL");
    }
}
