//! Form state: current values, per-field errors, submit gating, reset.
//!
//! Error map lifecycle:
//! - created empty,
//! - updated one field at a time by [`Form::handle_change`],
//! - replaced wholesale by [`Form::handle_submit`] / [`Form::validate_all`],
//! - cleared by [`Form::reset_form`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::ValidationRules;

/// Field name to current value.
pub type FormValues = BTreeMap<String, String>;

/// Field name to error message. A field with no entry has no error.
pub type ErrorMap = BTreeMap<String, String>;

/// A single field edit, as emitted by an input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub name: String,
    pub value: String,
}

impl ChangeEvent {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Validation engine for one form instance.
///
/// # Example
///
/// ```
/// use tablekit_form::{ChangeEvent, Form, FormValues, ValidationRules};
///
/// let initial = FormValues::from([("email".to_string(), String::new())]);
/// let rules = ValidationRules::new().rule("email", |v| {
///     (!v.contains('@')).then(|| "Invalid email".to_string())
/// });
/// let mut form = Form::new(&initial, rules);
///
/// form.handle_change(ChangeEvent::new("email", "alice"));
/// assert_eq!(form.error("email"), Some("Invalid email"));
///
/// form.handle_change(ChangeEvent::new("email", "alice@example.com"));
/// let submitted = form.handle_submit(|values| values["email"].clone());
/// assert_eq!(submitted.as_deref(), Some("alice@example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct Form {
    initial: FormValues,
    values: FormValues,
    errors: ErrorMap,
    rules: ValidationRules,
    submit_count: usize,
}

impl Form {
    /// Start a form from a copy of `initial`.
    pub fn new(initial: &FormValues, rules: ValidationRules) -> Self {
        Self {
            initial: initial.clone(),
            values: initial.clone(),
            errors: ErrorMap::new(),
            rules,
            submit_count: 0,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Current value of `name`, if the form tracks it.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Current error for `name`, if any.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// True when no error is currently recorded.
    ///
    /// This reflects the last evaluation only; untouched fields are not
    /// checked until submit.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when any value differs from the initial values.
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// Number of submit attempts since creation or the last reset.
    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Record a field edit and re-check only that field.
    ///
    /// Fields without a validator keep whatever error they had.
    pub fn handle_change(&mut self, event: ChangeEvent) {
        let ChangeEvent { name, value } = event;
        if self.rules.contains(&name) {
            match self.rules.check(&name, &value) {
                Some(message) => {
                    self.errors.insert(name.clone(), message);
                }
                None => {
                    self.errors.remove(&name);
                }
            }
        }
        self.values.insert(name, value);
    }

    /// Shorthand for [`handle_change`](Self::handle_change).
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.handle_change(ChangeEvent::new(name, value));
    }

    /// Check every rule against the current values, replacing the error map.
    ///
    /// A rule whose field has no value is checked against the empty string.
    /// Returns true when no field failed.
    pub fn validate_all(&mut self) -> bool {
        self.errors = self
            .rules
            .fields()
            .filter_map(|field| {
                let value = self.values.get(field).map_or("", String::as_str);
                self.rules
                    .check(field, value)
                    .map(|message| (field.to_string(), message))
            })
            .collect();
        self.errors.is_empty()
    }

    /// Validate the whole form and call `on_valid` only if nothing failed.
    ///
    /// This runs at once rather than returning a handler to call later, and
    /// `on_valid` receives the submitted values instead of reading them off
    /// the form. Wrap the call in a closure to defer it to an event.
    ///
    /// Returns the callback's result, or `None` when validation failed; the
    /// failures are then available through [`errors`](Self::errors).
    pub fn handle_submit<T, F>(&mut self, on_valid: F) -> Option<T>
    where
        F: FnOnce(&FormValues) -> T,
    {
        self.submit_count += 1;
        if self.validate_all() {
            tracing::debug!(submit = self.submit_count, "form submitted");
            Some(on_valid(&self.values))
        } else {
            tracing::debug!(
                submit = self.submit_count,
                errors = self.errors.len(),
                "form submission blocked by validation errors"
            );
            None
        }
    }

    /// Restore the initial values and clear every error.
    pub fn reset_form(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.submit_count = 0;
    }
}
