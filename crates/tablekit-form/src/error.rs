//! Error types for rule configuration.

use thiserror::Error;

/// Errors raised while compiling declarative rules into validators.
///
/// Validation itself never fails; these only occur when a rule
/// configuration is malformed.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A `pattern` rule holds an invalid regular expression.
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A `range` rule has `min` greater than `max`.
    #[error("invalid range for field '{field}': min {min} exceeds max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    /// A `one_of` rule lists no allowed values.
    #[error("empty choice list for field '{field}'")]
    EmptyChoices { field: String },
}

pub type Result<T> = std::result::Result<T, RuleError>;
