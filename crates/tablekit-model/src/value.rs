//! Field values and their coercion rules.
//!
//! Every engine reads record fields through [`FieldValue`]. The two coercions
//! that matter are [`FieldValue::display_string`] (used by filtering and by
//! mixed-type sorting) and [`compare_values`] (used by sorting).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single field value of a record.
///
/// Deserializes from any JSON value: `null` becomes [`FieldValue::Missing`],
/// arrays become [`FieldValue::List`], and nested objects are kept as their
/// compact JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    /// Absent, null, or unknown field.
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Nested sequence of values.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns true for [`FieldValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String representation used for filtering and mixed-type ordering.
    ///
    /// Returns an empty string for `Missing`. Numbers are formatted without
    /// a trailing `.0`, lists are joined with commas.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablekit_model::FieldValue;
    ///
    /// assert_eq!(FieldValue::Number(25.0).display_string(), "25");
    /// assert_eq!(FieldValue::Number(2.5).display_string(), "2.5");
    /// assert_eq!(FieldValue::Bool(true).display_string(), "true");
    /// assert_eq!(FieldValue::Missing.display_string(), "");
    /// ```
    pub fn display_string(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_numeric(*n),
            Self::Text(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(FieldValue::display_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// Formats a floating-point number the way it reads in a table cell.
///
/// Integer-valued floats print without a fractional part, negative zero
/// prints as `0`, and infinities print as `Infinity`/`-Infinity`.
///
/// # Examples
///
/// ```
/// use tablekit_model::format_numeric;
///
/// assert_eq!(format_numeric(40.0), "40");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(-0.0), "0");
/// assert_eq!(format_numeric(f64::INFINITY), "Infinity");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let s = format!("{v}");
    // Only trim trailing zeros if there's a decimal point
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Parses a trimmed string as a finite `f64`.
pub fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Orders two field values for sorting.
///
/// Both numbers compare numerically; any other pair compares by
/// [`FieldValue::display_string`]. `Missing` orders after every defined
/// value, and two `Missing` values are equal. Numbers use
/// [`f64::total_cmp`], so a positive `NaN` orders after every other number and `-0`
/// orders before `0`.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Greater,
        (_, FieldValue::Missing) => Ordering::Less,
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        _ => a.display_string().cmp(&b.display_string()),
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Missing, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Text(Value::Object(map).to_string()),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Missing => Value::Null,
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Number(n) => serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number),
            FieldValue::Text(s) => Value::String(s),
            FieldValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_string_list() {
        let value = FieldValue::from(vec![1, 2, 3]);
        assert_eq!(value.display_string(), "1,2,3");
    }

    #[test]
    fn test_format_numeric_keeps_significant_digits() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.25), "0.25");
        assert_eq!(format_numeric(-3.5), "-3.5");
    }

    #[test]
    fn test_parse_f64_rejects_non_finite() {
        assert_eq!(parse_f64(" 42 "), Some(42.0));
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("abc"), None);
    }

    #[test]
    fn test_compare_numbers_numerically() {
        let nine = FieldValue::Number(9.0);
        let ten = FieldValue::Number(10.0);
        assert_eq!(compare_values(&nine, &ten), Ordering::Less);
        // Lexicographically "10" < "9"; numeric comparison must win.
        assert_eq!(compare_values(&ten, &nine), Ordering::Greater);
    }

    #[test]
    fn test_compare_mixed_types_as_strings() {
        let number = FieldValue::Number(10.0);
        let text = FieldValue::from("9");
        assert_eq!(compare_values(&number, &text), Ordering::Less);
    }

    #[test]
    fn test_compare_missing_after_defined() {
        let missing = FieldValue::Missing;
        let text = FieldValue::from("zzz");
        assert_eq!(compare_values(&missing, &text), Ordering::Greater);
        assert_eq!(compare_values(&text, &missing), Ordering::Less);
        assert_eq!(compare_values(&missing, &FieldValue::Missing), Ordering::Equal);
    }

    #[test]
    fn test_compare_nan_after_numbers() {
        let nan = FieldValue::Number(f64::NAN);
        let one = FieldValue::Number(1.0);
        assert_eq!(compare_values(&nan, &one), Ordering::Greater);
        assert_eq!(compare_values(&nan, &nan), Ordering::Equal);
        assert_eq!(
            compare_values(&FieldValue::Number(-0.0), &FieldValue::Number(0.0)),
            Ordering::Less
        );
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Missing);
        assert_eq!(FieldValue::from(json!(30)), FieldValue::Number(30.0));
        assert_eq!(FieldValue::from(json!("Bob")), FieldValue::from("Bob"));
        assert_eq!(
            FieldValue::from(json!({"city": "Oslo"})),
            FieldValue::from(r#"{"city":"Oslo"}"#)
        );
    }

    #[test]
    fn test_serde_round_trip_through_json() {
        let value: FieldValue = serde_json::from_str("[\"a\", 1, null]").unwrap();
        assert_eq!(
            value,
            FieldValue::List(vec![
                FieldValue::from("a"),
                FieldValue::Number(1.0),
                FieldValue::Missing,
            ])
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), "[\"a\",1.0,null]");
    }
}
