use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tablekit_form::{FormValues, RuleSet};
use tablekit_ingest::load_records;
use tablekit_model::FieldValue;

use crate::cli::{CheckRulesArgs, TableArgs, ValidateArgs};
use crate::summary::{print_rule_summary, print_table_report, print_validation_report};
use tablekit_cli::report::{TableOptions, build_table_report, run_validation};

pub fn run_table(args: &TableArgs) -> Result<()> {
    let span = info_span!("table", file = %args.file.display());
    let _guard = span.enter();

    let loaded = load_records(&args.file)
        .with_context(|| format!("load records from {}", args.file.display()))?;
    let options = TableOptions {
        filter: args.filter.clone(),
        fields: args.fields.clone(),
        sorts: args.sorts.clone(),
        page: args.page,
        page_size: Some(args.page_size),
        sortable: !args.no_sort,
    };
    let report = build_table_report(&loaded, &options);
    info!(
        matched = report.view.matched,
        total = report.view.total,
        "table built"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize table report")?
        );
    } else {
        print_table_report(&report);
    }
    Ok(())
}

/// Returns whether the submitted values passed validation.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let span = info_span!("validate", rules = %args.rules.display());
    let _guard = span.enter();

    let rule_set = read_rule_set(&args.rules)?;
    let values = read_form_values(&args.values)?;
    let report = run_validation(&rule_set, &values)
        .with_context(|| format!("compile rules from {}", args.rules.display()))?;
    info!(
        valid = report.valid,
        errors = report.errors.len(),
        "form submitted"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize validation report")?
        );
    } else {
        print_validation_report(&report);
    }
    Ok(report.valid)
}

pub fn run_check_rules(args: &CheckRulesArgs) -> Result<()> {
    let rule_set = read_rule_set(&args.rules)?;
    rule_set
        .compile()
        .with_context(|| format!("compile rules from {}", args.rules.display()))?;
    print_rule_summary(&rule_set);
    Ok(())
}

fn read_rule_set(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read rule file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse rule file {}", path.display()))
}

/// Values may be any JSON scalar; they are coerced to their display form.
fn read_form_values(path: &Path) -> Result<FormValues> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read values file {}", path.display()))?;
    let raw: BTreeMap<String, FieldValue> = serde_json::from_str(&text)
        .with_context(|| format!("parse values file {}", path.display()))?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name, value.display_string()))
        .collect())
}
