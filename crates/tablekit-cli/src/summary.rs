use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use tablekit_cli::report::{TableReport, ValidationReport};
use tablekit_form::RuleSet;

pub fn print_table_report(report: &TableReport) {
    let mut table = Table::new();
    table.set_header(report.headers.iter().map(|label| header_cell(label)));
    apply_table_style(&mut table);
    for row in &report.rows {
        table.add_row(row.iter().map(|value| value_cell(value)));
    }
    println!("{table}");

    let view = &report.view;
    let mut footer = format!(
        "{} of {} records, page {} of {}",
        view.matched,
        view.total,
        view.page + 1,
        view.page_count
    );
    if !view.filter_text.is_empty() {
        footer.push_str(&format!(", filter \"{}\"", view.filter_text));
    }
    if let Some(sort) = &view.sort {
        footer.push_str(&format!(", sorted by {} {}", sort.key, sort.direction));
    }
    println!("{footer}");
}

pub fn print_validation_report(report: &ValidationReport) {
    if report.valid {
        println!("Valid: {} field rule(s) passed", report.fields_checked);
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Error")]);
    apply_table_style(&mut table);
    for (field, message) in &report.errors {
        table.add_row(vec![
            Cell::new(field).add_attribute(Attribute::Bold),
            Cell::new(message).fg(Color::Red),
        ]);
    }
    println!("{table}");
    println!(
        "Invalid: {} of {} field rule(s) failed",
        report.errors.len(),
        report.fields_checked
    );
}

pub fn print_rule_summary(rule_set: &RuleSet) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Rules")]);
    apply_table_style(&mut table);
    for field in rule_set.fields() {
        table.add_row(vec![
            Cell::new(field),
            Cell::new(rule_set.rules_for(field).len()),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        Cell::new("-").add_attribute(Attribute::Dim)
    } else {
        Cell::new(value)
    }
}
