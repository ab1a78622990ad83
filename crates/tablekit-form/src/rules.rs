//! Per-field validator functions.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Message recorded for a field whose validator panicked.
pub const VALIDATOR_FAILURE_MESSAGE: &str = "Invalid value";

/// A pure check of one field value: `None` when valid, otherwise the
/// message to show.
pub type Validator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Field name to validator mapping.
///
/// Cloning is cheap; validators are shared, not copied.
///
/// # Example
///
/// ```
/// use tablekit_form::ValidationRules;
///
/// let rules = ValidationRules::new().rule("name", |value| {
///     value.trim().is_empty().then(|| "Name is required".to_string())
/// });
///
/// assert_eq!(rules.check("name", ""), Some("Name is required".to_string()));
/// assert_eq!(rules.check("name", "Alice"), None);
/// assert_eq!(rules.check("email", ""), None);
/// ```
#[derive(Clone, Default)]
pub struct ValidationRules {
    validators: BTreeMap<String, Validator>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration. A later rule for the same field replaces
    /// the earlier one.
    #[must_use]
    pub fn rule<F>(mut self, field: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.insert(field, Arc::new(validator));
        self
    }

    /// Register an already-shared validator.
    pub fn insert(&mut self, field: impl Into<String>, validator: Validator) {
        self.validators.insert(field.into(), validator);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.validators.contains_key(field)
    }

    /// Fields that have a validator, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run the validator for `field` against `value`.
    ///
    /// Fields without a validator are valid. A panicking validator is
    /// contained and reported as [`VALIDATOR_FAILURE_MESSAGE`].
    pub fn check(&self, field: &str, value: &str) -> Option<String> {
        let validator = self.validators.get(field)?;
        match catch_unwind(AssertUnwindSafe(|| (**validator)(value))) {
            Ok(result) => {
                tracing::trace!(field, valid = result.is_none(), "field validated");
                result
            }
            Err(_) => {
                tracing::warn!(field, "validator panicked; marking field invalid");
                Some(VALIDATOR_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules")
            .field("fields", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_rule_replaces_earlier() {
        let rules = ValidationRules::new()
            .rule("a", |_| Some("first".to_string()))
            .rule("a", |_| Some("second".to_string()));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.check("a", ""), Some("second".to_string()));
    }

    #[test]
    fn test_panicking_validator_is_contained() {
        let rules = ValidationRules::new().rule("age", |value| {
            let parsed: u32 = value.parse().unwrap();
            (parsed < 18).then(|| "Too young".to_string())
        });
        assert_eq!(
            rules.check("age", "abc"),
            Some(VALIDATOR_FAILURE_MESSAGE.to_string())
        );
        assert_eq!(rules.check("age", "12"), Some("Too young".to_string()));
        assert_eq!(rules.check("age", "30"), None);
    }

    #[test]
    fn test_fields_listed_in_order() {
        let rules = ValidationRules::new()
            .rule("b", |_| None)
            .rule("a", |_| None);
        assert_eq!(rules.fields().collect::<Vec<_>>(), ["a", "b"]);
        assert!(rules.contains("a"));
        assert!(!rules.contains("c"));
    }
}
