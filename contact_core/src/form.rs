//! Form field access and the submit control

use crate::models::RawFields;
use parking_lot::Mutex;
use std::sync::Arc;

pub const DEFAULT_SUBMIT_LABEL: &str = "Send Message";

/// Read/write access to the three contact fields and the submit control.
pub trait FormFields: Send + Sync {
    fn values(&self) -> RawFields;
    fn clear(&self);
    fn submit_label(&self) -> String;
    fn set_submit_label(&self, label: &str);
    fn is_submit_enabled(&self) -> bool;
    fn set_submit_enabled(&self, enabled: bool);
}

#[derive(Debug)]
struct FormState {
    fields: RawFields,
    submit_label: String,
    submit_enabled: bool,
}

#[derive(Clone)]
pub struct MemoryForm {
    state: Arc<Mutex<FormState>>,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LABEL)
    }
}

impl MemoryForm {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState {
                fields: RawFields::default(),
                submit_label: submit_label.into(),
                submit_enabled: true,
            })),
        }
    }

    pub fn with_values(fields: RawFields) -> Self {
        let form = Self::default();
        form.fill(fields);
        form
    }

    pub fn fill(&self, fields: RawFields) {
        self.state.lock().fields = fields;
    }

    pub fn set_name(&self, name: &str) {
        self.state.lock().fields.name = name.to_string();
    }

    pub fn set_email(&self, email: &str) {
        self.state.lock().fields.email = email.to_string();
    }

    pub fn set_message(&self, message: &str) {
        self.state.lock().fields.message = message.to_string();
    }
}

impl FormFields for MemoryForm {
    fn values(&self) -> RawFields {
        self.state.lock().fields.clone()
    }

    fn clear(&self) {
        self.state.lock().fields = RawFields::default();
    }

    fn submit_label(&self) -> String {
        self.state.lock().submit_label.clone()
    }

    fn set_submit_label(&self, label: &str) {
        self.state.lock().submit_label = label.to_string();
    }

    fn is_submit_enabled(&self) -> bool {
        self.state.lock().submit_enabled
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.state.lock().submit_enabled = enabled;
    }
}

/// Puts the submit control into its busy state and restores it on drop.
///
/// Dropping covers every exit path, including a cancelled submission future.
pub struct SubmitGuard<'a> {
    form: &'a dyn FormFields,
    original_label: String,
}

impl<'a> SubmitGuard<'a> {
    pub fn engage(form: &'a dyn FormFields, busy_label: &str) -> Self {
        let original_label = form.submit_label();
        form.set_submit_enabled(false);
        form.set_submit_label(busy_label);
        Self {
            form,
            original_label,
        }
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.form.set_submit_label(&self.original_label);
        self.form.set_submit_enabled(true);
    }
}
