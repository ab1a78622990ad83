//! Free-text filtering across record fields.

use tablekit_model::Record;

/// Case-insensitive substring match.
///
/// Returns `true` if:
/// - The query is empty (matches everything), or
/// - The text contains the query, ignoring case
///
/// # Example
///
/// ```
/// use tablekit_table::matches_query;
///
/// assert!(matches_query("alice@example.com", ""));
/// assert!(matches_query("alice@example.com", "ALICE"));
/// assert!(!matches_query("alice@example.com", "bob"));
/// ```
pub fn matches_query(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Filter state plus the derived filtered view.
///
/// A record is kept when any inspected field contains the filter text.
/// The inspected fields are either an explicit list or, by default, every
/// field the record reports. Missing fields never match.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    filter_text: String,
    fields: Option<Vec<String>>,
}

impl FilterEngine {
    /// An engine with empty filter text, inspecting all fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict matching to the given fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the inspected field list. `None` inspects every field.
    pub fn set_fields(&mut self, fields: Option<Vec<String>>) {
        self.fields = fields;
    }

    /// The explicit field list, if one was configured.
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Current filter text, exactly as it was set.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Set the filter text verbatim. No trimming is applied.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        tracing::debug!(filter = %self.filter_text, "filter changed");
    }

    /// Whether `record` passes the current filter.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let field_matches = |name: &str| {
            let value = record.field(name);
            !value.is_missing() && matches_query(&value.display_string(), &self.filter_text)
        };
        match &self.fields {
            Some(fields) => fields.iter().any(|name| field_matches(name.as_str())),
            None => record.field_names().iter().any(|name| field_matches(name.as_str())),
        }
    }

    /// The records that pass the filter, in input order.
    pub fn filtered<'a, R: Record>(&self, data: &'a [R]) -> Vec<&'a R> {
        self.filter_view(data.iter().collect())
    }

    /// Filter an already-derived view.
    pub fn filter_view<'a, R: Record>(&self, view: Vec<&'a R>) -> Vec<&'a R> {
        if self.filter_text.is_empty() {
            return view;
        }
        view.into_iter().filter(|record| self.matches(*record)).collect()
    }
}
