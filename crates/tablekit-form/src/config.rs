//! Declarative rule configuration.
//!
//! A [`RuleSet`] maps each field to an ordered list of [`RuleConfig`]
//! entries and compiles into [`ValidationRules`]. For each field the first
//! failing rule's message is reported. Every rule except `required` accepts
//! blank input, so optional fields stay valid until something is typed.
//!
//! ```
//! use tablekit_form::RuleSet;
//!
//! let set: RuleSet = serde_json::from_str(r#"{
//!     "email": [
//!         {"kind": "required", "message": "Email is required"},
//!         {"kind": "email"}
//!     ]
//! }"#).unwrap();
//! let rules = set.compile().unwrap();
//!
//! assert_eq!(rules.check("email", ""), Some("Email is required".to_string()));
//! assert_eq!(rules.check("email", "nope"), Some("Invalid email address".to_string()));
//! assert_eq!(rules.check("email", "a@b.co"), None);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tablekit_model::parse_f64;

use crate::error::{Result, RuleError};
use crate::rules::ValidationRules;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// One declarative check on a field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Value must contain a non-whitespace character.
    Required {
        #[serde(default)]
        message: Option<String>,
    },
    /// At least `min` characters.
    MinLength {
        min: usize,
        #[serde(default)]
        message: Option<String>,
    },
    /// At most `max` characters.
    MaxLength {
        max: usize,
        #[serde(default)]
        message: Option<String>,
    },
    /// Value must match the regular expression.
    Pattern {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
    Email {
        #[serde(default)]
        message: Option<String>,
    },
    /// Value must parse as a finite number.
    Numeric {
        #[serde(default)]
        message: Option<String>,
    },
    /// Numeric value within inclusive bounds.
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        message: Option<String>,
    },
    /// Value must equal one of the listed choices.
    OneOf {
        values: Vec<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl RuleConfig {
    fn compile(&self, field: &str) -> Result<CompiledRule> {
        let rule = match self {
            Self::Required { message } => CompiledRule::Required {
                message: message_or(message, "This field is required"),
            },
            Self::MinLength { min, message } => CompiledRule::MinLength {
                min: *min,
                message: message_or(message, &format!("Must be at least {min} characters")),
            },
            Self::MaxLength { max, message } => CompiledRule::MaxLength {
                max: *max,
                message: message_or(message, &format!("Must be at most {max} characters")),
            },
            Self::Pattern { pattern, message } => CompiledRule::Pattern {
                regex: compile_regex(field, pattern)?,
                message: message_or(message, "Invalid format"),
            },
            Self::Email { message } => CompiledRule::Pattern {
                regex: compile_regex(field, EMAIL_PATTERN)?,
                message: message_or(message, "Invalid email address"),
            },
            Self::Numeric { message } => CompiledRule::Numeric {
                message: message_or(message, "Must be a number"),
            },
            Self::Range { min, max, message } => {
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(RuleError::InvalidRange {
                        field: field.to_string(),
                        min: *lo,
                        max: *hi,
                    });
                }
                CompiledRule::Range {
                    min: *min,
                    max: *max,
                    message: message.clone(),
                }
            }
            Self::OneOf { values, message } => {
                if values.is_empty() {
                    return Err(RuleError::EmptyChoices {
                        field: field.to_string(),
                    });
                }
                CompiledRule::OneOf {
                    message: message_or(message, &format!("Must be one of: {}", values.join(", "))),
                    values: values.clone(),
                }
            }
        };
        Ok(rule)
    }
}

/// Field name to rule list, as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: BTreeMap<String, Vec<RuleConfig>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to a field's list.
    #[must_use]
    pub fn with_rule(mut self, field: impl Into<String>, rule: RuleConfig) -> Self {
        self.fields.entry(field.into()).or_default().push(rule);
        self
    }

    /// Configured fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Rules configured for `field`.
    pub fn rules_for(&self, field: &str) -> &[RuleConfig] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Compile every field's rule list into validators.
    ///
    /// # Errors
    ///
    /// Returns the first malformed rule: an invalid pattern, an inverted
    /// range, or an empty choice list.
    pub fn compile(&self) -> Result<ValidationRules> {
        let mut rules = ValidationRules::new();
        for (field, configs) in &self.fields {
            let compiled = configs
                .iter()
                .map(|config| config.compile(field))
                .collect::<Result<Vec<_>>>()?;
            tracing::debug!(field = %field, rules = compiled.len(), "compiled field rules");
            rules.insert(
                field.clone(),
                Arc::new(move |value: &str| compiled.iter().find_map(|rule| rule.check(value))),
            );
        }
        Ok(rules)
    }
}

#[derive(Debug)]
enum CompiledRule {
    Required { message: String },
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    Pattern { regex: Regex, message: String },
    Numeric { message: String },
    Range {
        min: Option<f64>,
        max: Option<f64>,
        message: Option<String>,
    },
    OneOf { values: Vec<String>, message: String },
}

impl CompiledRule {
    fn check(&self, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return match self {
                Self::Required { message } => Some(message.clone()),
                _ => None,
            };
        }
        match self {
            Self::Required { .. } => None,
            Self::MinLength { min, message } => {
                (value.chars().count() < *min).then(|| message.clone())
            }
            Self::MaxLength { max, message } => {
                (value.chars().count() > *max).then(|| message.clone())
            }
            Self::Pattern { regex, message } => (!regex.is_match(value)).then(|| message.clone()),
            Self::Numeric { message } => parse_f64(value).is_none().then(|| message.clone()),
            Self::Range { min, max, message } => {
                let Some(number) = parse_f64(value) else {
                    return Some(message.clone().unwrap_or_else(|| "Must be a number".to_string()));
                };
                if let Some(lo) = min
                    && number < *lo
                {
                    return Some(message.clone().unwrap_or_else(|| format!("Must be at least {lo}")));
                }
                if let Some(hi) = max
                    && number > *hi
                {
                    return Some(message.clone().unwrap_or_else(|| format!("Must be at most {hi}")));
                }
                None
            }
            Self::OneOf { values, message } => {
                (!values.iter().any(|allowed| allowed == value)).then(|| message.clone())
            }
        }
    }
}

fn message_or(message: &Option<String>, default: &str) -> String {
    message.clone().unwrap_or_else(|| default.to_string())
}

fn compile_regex(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        field: field.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(json: &str) -> ValidationRules {
        let set: RuleSet = serde_json::from_str(json).expect("parse rule set");
        set.compile().expect("compile rule set")
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let rules = compile(
            r#"{"password": [
                {"kind": "required"},
                {"kind": "min_length", "min": 8},
                {"kind": "pattern", "pattern": "[0-9]", "message": "Needs a digit"}
            ]}"#,
        );
        assert_eq!(rules.check("password", " "), Some("This field is required".to_string()));
        assert_eq!(
            rules.check("password", "abc"),
            Some("Must be at least 8 characters".to_string())
        );
        assert_eq!(rules.check("password", "abcdefgh"), Some("Needs a digit".to_string()));
        assert_eq!(rules.check("password", "abcdefg1"), None);
    }

    #[test]
    fn test_optional_rules_accept_blank() {
        let rules = compile(r#"{"website": [{"kind": "pattern", "pattern": "^https://"}]}"#);
        assert_eq!(rules.check("website", ""), None);
        assert_eq!(rules.check("website", "http://x"), Some("Invalid format".to_string()));
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = compile(r#"{"name": [{"kind": "max_length", "max": 3}]}"#);
        assert_eq!(rules.check("name", "äöü"), None);
        assert_eq!(
            rules.check("name", "äöüß"),
            Some("Must be at most 3 characters".to_string())
        );
    }

    #[test]
    fn test_range_and_numeric() {
        let rules = compile(r#"{"age": [{"kind": "range", "min": 18, "max": 120}]}"#);
        assert_eq!(rules.check("age", "abc"), Some("Must be a number".to_string()));
        assert_eq!(rules.check("age", "17"), Some("Must be at least 18".to_string()));
        assert_eq!(rules.check("age", "121"), Some("Must be at most 120".to_string()));
        assert_eq!(rules.check("age", "42"), None);

        let numeric = compile(r#"{"qty": [{"kind": "numeric"}]}"#);
        assert_eq!(numeric.check("qty", "1.5"), None);
        assert_eq!(numeric.check("qty", " 7 "), None);
        assert_eq!(numeric.check("qty", "inf"), Some("Must be a number".to_string()));
        assert_eq!(numeric.check("qty", "NaN"), Some("Must be a number".to_string()));
    }

    #[test]
    fn test_one_of() {
        let rules = compile(r#"{"role": [{"kind": "one_of", "values": ["admin", "user"]}]}"#);
        assert_eq!(rules.check("role", "user"), None);
        assert_eq!(
            rules.check("role", "guest"),
            Some("Must be one of: admin, user".to_string())
        );
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let set = RuleSet::new().with_rule(
            "code",
            RuleConfig::Pattern {
                pattern: "(".to_string(),
                message: None,
            },
        );
        let err = set.compile().unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { ref field, .. } if field == "code"));
    }

    #[test]
    fn test_inverted_range_is_reported() {
        let set = RuleSet::new().with_rule(
            "n",
            RuleConfig::Range {
                min: Some(5.0),
                max: Some(1.0),
                message: None,
            },
        );
        assert!(matches!(set.compile(), Err(RuleError::InvalidRange { .. })));
    }

    #[test]
    fn test_empty_choices_is_reported() {
        let set = RuleSet::new().with_rule(
            "n",
            RuleConfig::OneOf {
                values: vec![],
                message: None,
            },
        );
        assert!(matches!(set.compile(), Err(RuleError::EmptyChoices { .. })));
    }

    #[test]
    fn test_rules_for_unknown_field_is_empty() {
        let set = RuleSet::new().with_rule("a", RuleConfig::Numeric { message: None });
        assert!(set.rules_for("b").is_empty());
        assert_eq!(set.rules_for("a").len(), 1);
        assert_eq!(set.fields().collect::<Vec<_>>(), ["a"]);
    }
}
