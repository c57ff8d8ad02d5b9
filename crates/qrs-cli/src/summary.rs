//! End-of-run terminal summary.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::QuarterRunResult;

pub fn print_summary(result: &QuarterRunResult) {
    println!("Quarter: {} {}", result.year, result.quarter);
    println!("Output: {}", result.output_dir.display());
    if let Some(path) = &result.final_workbook {
        println!("Final workbook: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Sheet"),
        header_cell("Input file"),
        header_cell("Records"),
        header_cell("Stat blocks"),
        header_cell("No-target rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    let mut total_records = 0usize;
    for summary in &result.sources {
        if let Some(records) = summary.records {
            total_records += records;
        }
        let input_cell = match &summary.input_file {
            Some(path) => Cell::new(
                path.file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("?"),
            ),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(summary.source.code())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.source.output_sheet()),
            input_cell,
            count_cell(summary.records),
            Cell::new(summary.stat_blocks),
            Cell::new(summary.target_excluded),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All sources")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
