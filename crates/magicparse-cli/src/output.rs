//! Rendering parse results for the terminal.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;

use magicparse_core::{Category, ErrorRecord, ParseResult, Row};

/// Pretty JSON: `{"rows": [...], "errors": [...]}`, or only the errors.
pub fn render_json(result: &ParseResult, errors_only: bool) -> Result<String> {
    let text = if errors_only {
        serde_json::to_string_pretty(&json!({ "errors": result.errors }))?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(text)
}

/// Rows and errors as tables, followed by a one-line summary.
pub fn render_tables(result: &ParseResult, errors_only: bool) -> String {
    let mut sections = Vec::new();
    if !errors_only && !result.rows.is_empty() {
        sections.push(rows_table(&result.rows).to_string());
    }
    if !result.errors.is_empty() {
        sections.push(errors_table(&result.errors).to_string());
    }
    sections.push(format!(
        "{} row(s) read, {} parsed, {} rejected",
        result.total(),
        result.rows.len(),
        result.errors.len()
    ));
    sections.join("\n\n")
}

pub fn rows_table(rows: &[Row]) -> Table {
    let columns = column_keys(rows);
    let mut table = Table::new();
    table.set_header(columns.iter().map(|key| header_cell(key)));
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(columns.iter().map(|key| match row.get(key) {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        }));
    }
    table
}

pub fn errors_table(errors: &[ErrorRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Position"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for error in errors {
        table.add_row(vec![
            Cell::new(error.row_number),
            Cell::new(&error.field_key),
            Cell::new(error.position),
            Cell::new(&error.error).fg(Color::Red),
        ]);
    }
    table
}

/// One row per category, plus the registered file types.
pub fn transforms_table(categories: &[(Category, Vec<String>)], file_types: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Names")]);
    apply_table_style(&mut table);
    for (category, names) in categories {
        table.add_row(vec![Cell::new(category), Cell::new(names.join(", "))]);
    }
    table.add_row(vec![Cell::new("file type"), Cell::new(file_types.join(", "))]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Keys across all rows, in first-seen order.
fn column_keys(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Dim)
}
