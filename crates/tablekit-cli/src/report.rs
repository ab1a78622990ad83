//! Command results, independent of how they are printed.

use serde::Serialize;
use tablekit_form::{ErrorMap, Form, FormValues, RuleSet};
use tablekit_ingest::LoadedTable;
use tablekit_model::Record;
use tablekit_table::{Column, DataTable, TableView};

/// How the `table` command shapes its output.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub filter: Option<String>,
    /// Restrict filtering to these fields; empty means every column.
    pub fields: Vec<String>,
    /// Sort requests, applied in order.
    pub sorts: Vec<String>,
    /// One-based page number.
    pub page: usize,
    pub page_size: Option<usize>,
    pub sortable: bool,
}

/// Rendered page of a table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub view: TableView,
}

/// Apply filter, sort requests, and paging to a loaded table.
pub fn build_table_report(loaded: &LoadedTable, options: &TableOptions) -> TableReport {
    let columns: Vec<Column> = loaded
        .columns
        .iter()
        .map(|key| {
            Column::new(key.as_str())
                .searchable(options.fields.is_empty() || options.fields.contains(key))
        })
        .collect();
    let mut table = DataTable::new(columns)
        .with_sortable(options.sortable)
        .with_page_size(options.page_size);

    if let Some(filter) = &options.filter {
        table.set_filter_text(filter.as_str());
    }
    for key in &options.sorts {
        table.request_sort(key);
    }
    let matched = table.rows(&loaded.rows).len();
    table.set_page(options.page.saturating_sub(1), matched);

    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|column| table.header_label(column))
        .collect();
    let rows: Vec<Vec<String>> = table
        .page_rows(&loaded.rows)
        .into_iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|column| row.field(&column.key).display_string())
                .collect::<Vec<_>>()
        })
        .collect();

    TableReport {
        headers,
        rows,
        view: table.view(&loaded.rows),
    }
}

/// Outcome of submitting a set of values against a rule file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub fields_checked: usize,
    pub errors: ErrorMap,
}

/// Compile `rule_set`, load `values` into a form, and submit it.
///
/// # Errors
///
/// Fails only when the rule set does not compile.
pub fn run_validation(
    rule_set: &RuleSet,
    values: &FormValues,
) -> tablekit_form::Result<ValidationReport> {
    let rules = rule_set.compile()?;
    let fields_checked = rules.len();
    let mut form = Form::new(values, rules);
    let valid = form.handle_submit(|_| ()).is_some();
    Ok(ValidationReport {
        valid,
        fields_checked,
        errors: form.errors().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekit_form::RuleConfig;
    use tablekit_model::Row;

    fn loaded() -> LoadedTable {
        LoadedTable {
            columns: vec!["id".into(), "name".into(), "age".into()],
            rows: vec![
                Row::new().with("id", 1).with("name", "Alice").with("age", 25),
                Row::new().with("id", 2).with("name", "Bob").with("age", 30),
                Row::new().with("id", 3).with("name", "Charlie").with("age", 20),
            ],
        }
    }

    #[test]
    fn test_repeated_sort_walks_the_cycle() {
        let mut options = TableOptions {
            sorts: vec!["name".into(), "name".into()],
            page: 1,
            page_size: None,
            sortable: true,
            ..TableOptions::default()
        };
        let report = build_table_report(&loaded(), &options);
        assert_eq!(report.rows[0][1], "Charlie");
        assert_eq!(report.headers[1], "name ▼");

        options.sorts.push("name".into());
        let report = build_table_report(&loaded(), &options);
        assert_eq!(report.rows[0][1], "Alice");
        assert_eq!(report.headers[1], "name");
    }

    #[test]
    fn test_page_clamped() {
        let options = TableOptions {
            page: 7,
            page_size: Some(2),
            sortable: true,
            ..TableOptions::default()
        };
        let report = build_table_report(&loaded(), &options);
        assert_eq!(report.view.page, 1);
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn test_run_validation_reports_errors() {
        let set = RuleSet::new().with_rule("name", RuleConfig::Required { message: None });
        let report = run_validation(&set, &FormValues::new()).unwrap();
        assert!(!report.valid);
        assert_eq!(report.fields_checked, 1);
        assert_eq!(report.errors["name"], "This field is required");
    }
}
