//! Contact form client: validation, submission to a remote endpoint and
//! user-facing notifications, with the page collaborators injected.

pub mod config;
pub mod error;
pub mod form;
pub mod health;
pub mod models;
pub mod notification;
pub mod submitter;
pub mod transport;
pub mod validation;

pub use config::ContactConfig;
pub use error::{ContactError, Result};
pub use form::{FormFields, MemoryForm, SubmitGuard};
pub use health::{BackendHealth, HealthMonitor, HealthStatus};
pub use models::{ContactRequest, ContactResponse, RawFields};
pub use notification::{MemoryNotifier, Notification, NotificationSink, Severity, TracingNotifier};
pub use submitter::{ContactSubmitter, SubmissionOutcome};
pub use transport::{ContactTransport, FetchOutcome, HttpTransport, TransportOutcome};
pub use validation::{validate_contact_request, ContactRules};

use std::sync::Arc;

/// Builds a submitter that talks to the configured endpoint over HTTP.
pub fn http_submitter(
    config: ContactConfig,
    form: Arc<dyn FormFields>,
    notifier: Arc<dyn NotificationSink>,
) -> Result<ContactSubmitter> {
    config.validate()?;
    let transport: Arc<dyn ContactTransport> = Arc::new(HttpTransport::new()?);
    Ok(ContactSubmitter::new(config, form, notifier, transport))
}
