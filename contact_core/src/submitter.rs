//! Contact form submission flow
//!
//! One call to [`ContactSubmitter::submit`] takes the raw field values
//! through validation, a bounded POST to the configured endpoint and a
//! notification describing the outcome. Failures never escape the call;
//! they come back as [`SubmissionOutcome::Failed`] after the user has been
//! told about them.

use crate::config::ContactConfig;
use crate::error::ContactError;
use crate::form::{FormFields, SubmitGuard};
use crate::models::{ContactRequest, RawFields};
use crate::notification::{NotificationSink, Severity};
use crate::transport::{ContactTransport, TransportOutcome};
use crate::validation::{validate_contact_request, ContactRules};
use http::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

pub const UNCONFIRMED_SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The backend accepted the message. `confirmed` is false when the
    /// response carried no structured body to confirm it.
    Delivered { message: String, confirmed: bool },
    Failed(ContactError),
}

impl SubmissionOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmissionOutcome::Delivered { .. })
    }

    pub fn error(&self) -> Option<&ContactError> {
        match self {
            SubmissionOutcome::Failed(err) => Some(err),
            SubmissionOutcome::Delivered { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Delivered { .. } => "delivered",
            SubmissionOutcome::Failed(err) => err.kind(),
        }
    }
}

#[derive(Clone)]
pub struct ContactSubmitter {
    config: ContactConfig,
    rules: ContactRules,
    form: Arc<dyn FormFields>,
    notifier: Arc<dyn NotificationSink>,
    transport: Arc<dyn ContactTransport>,
}

impl ContactSubmitter {
    pub fn new(
        config: ContactConfig,
        form: Arc<dyn FormFields>,
        notifier: Arc<dyn NotificationSink>,
        transport: Arc<dyn ContactTransport>,
    ) -> Self {
        let rules = ContactRules::from(&config.form);
        Self {
            config,
            rules,
            form,
            notifier,
            transport,
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Reads the current field values and submits them.
    pub async fn submit_form(&self) -> SubmissionOutcome {
        let raw = self.form.values();
        self.submit(raw).await
    }

    pub async fn submit(&self, raw: RawFields) -> SubmissionOutcome {
        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!("contact_submission", %submission_id);
        self.run(raw).instrument(span).await
    }

    async fn run(&self, raw: RawFields) -> SubmissionOutcome {
        let request = ContactRequest::from_raw(&raw);

        if let Err(err) = validate_contact_request(&request, &self.rules) {
            debug!(kind = err.kind(), "Submission rejected locally: {}", err);
            self.notify(&err.user_message(), Severity::Error, self.config.notifications.validation_ms);
            return SubmissionOutcome::Failed(err);
        }

        let outcome = {
            let _guard = SubmitGuard::engage(self.form.as_ref(), &self.config.form.sending_label);
            info!(endpoint = %self.config.endpoint.url, "Sending contact request");

            let transport_outcome = self
                .transport
                .post_contact(&self.config.endpoint.url, &request, self.config.endpoint.timeout())
                .await;

            classify(transport_outcome)
        };

        self.report(&outcome);
        outcome
    }

    fn report(&self, outcome: &SubmissionOutcome) {
        let durations = &self.config.notifications;
        match outcome {
            SubmissionOutcome::Delivered { message, confirmed } => {
                info!(confirmed, "Contact message delivered");
                self.form.clear();
                self.notify(message, Severity::Success, durations.success_ms);
            }
            SubmissionOutcome::Failed(err @ ContactError::Rejected { errors, .. }) => {
                warn!(errors = ?errors, "Contact message rejected by server: {}", err);
                self.notify(&err.user_message(), Severity::Error, durations.rejected_ms);
            }
            SubmissionOutcome::Failed(err) => {
                error!(kind = err.kind(), endpoint = %self.config.endpoint.url, "Form submission failed: {}", err);
                self.notify(&err.user_message(), Severity::Error, durations.failure_ms);
            }
        }
    }

    fn notify(&self, message: &str, severity: Severity, duration_ms: u64) {
        self.notifier
            .show(message, severity, Duration::from_millis(duration_ms));
    }
}

/// Maps a transport result onto the submission taxonomy.
pub fn classify(outcome: TransportOutcome) -> SubmissionOutcome {
    match outcome {
        TransportOutcome::Timeout(after) => SubmissionOutcome::Failed(ContactError::Timeout(after)),
        TransportOutcome::NetworkFailure(reason) => {
            SubmissionOutcome::Failed(ContactError::Network(reason))
        }
        TransportOutcome::HttpStatus { status, .. } => {
            if is_success(status) {
                SubmissionOutcome::Delivered {
                    message: UNCONFIRMED_SUCCESS_MESSAGE.to_string(),
                    confirmed: false,
                }
            } else {
                SubmissionOutcome::Failed(ContactError::Server { status })
            }
        }
        TransportOutcome::Malformed { status, reason } => {
            warn!(status, "Undecodable JSON body: {}", reason);
            SubmissionOutcome::Failed(ContactError::Server { status })
        }
        TransportOutcome::Parsed { status, response } => {
            if is_success(status) && response.success {
                SubmissionOutcome::Delivered {
                    message: response
                        .message
                        .clone()
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| UNCONFIRMED_SUCCESS_MESSAGE.to_string()),
                    confirmed: true,
                }
            } else {
                SubmissionOutcome::Failed(ContactError::Rejected {
                    message: response.failure_message(),
                    errors: response.errors(),
                })
            }
        }
    }
}

fn is_success(status: u16) -> bool {
    StatusCode::from_u16(status)
        .map(|s| s.is_success())
        .unwrap_or(false)
}
