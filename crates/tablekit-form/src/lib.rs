//! Form validation engine.
//!
//! A [`Form`] tracks field values, re-checks a field on every change, checks
//! everything on submit, and resets to its initial values on request.
//! Validators are plain functions from a field value to an optional error
//! message; they can be written in code ([`ValidationRules::rule`]) or
//! loaded from configuration ([`RuleSet`]).

pub mod config;
pub mod error;
pub mod form;
pub mod rules;

pub use config::{RuleConfig, RuleSet};
pub use error::{Result, RuleError};
pub use form::{ChangeEvent, ErrorMap, Form, FormValues};
pub use rules::{VALIDATOR_FAILURE_MESSAGE, ValidationRules, Validator};
