use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use chrono::NaiveDate;
use qc_model::columns::DATE_FORMAT;
use qc_transform::{OutlierBounds, ParetoEntry};

use crate::commands::{INLIERS_FILE, OUTLIERS_FILE};
use crate::types::{CleanReportResult, LotResult, PrepareResult};

pub fn print_prepare_summary(result: &PrepareResult) {
    println!("Input: {}", result.input.display());
    match &result.output_dir {
        Some(dir) => println!(
            "Output: {} ({INLIERS_FILE}, {OUTLIERS_FILE})",
            dir.display()
        ),
        None => println!("Output: dry run, nothing written"),
    }
    println!("{}", format_bounds(result.bounds.as_ref()));
    println!("{}", counts_table(result));
    println!("{}", statistics_table(result));
    if !result.pareto.is_empty() {
        println!("{}", pareto_table(&result.pareto));
    }
}

pub fn print_clean_summary(result: &CleanReportResult) {
    println!(
        "Cleaned report: {} ({} of {} rows kept)",
        result.output.display(),
        result.output_rows,
        result.input_rows
    );
}

pub fn print_lot(result: &LotResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Lot"), Cell::new(&result.lot)]);
    table.add_row(vec![Cell::new("Category"), Cell::new(result.category)]);
    table.add_row(vec![
        Cell::new("Warehouse date"),
        date_cell(result.info.warehouse_date),
    ]);
    table.add_row(vec![
        Cell::new("Supplier"),
        text_cell(result.info.supplier_name.as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Supplier date"),
        date_cell(result.info.supplier_date),
    ]);
    table.add_row(vec![
        Cell::new("Final date").add_attribute(Attribute::Bold),
        date_cell(result.final_date).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

/// One-line description of the outlier band.
pub fn format_bounds(bounds: Option<&OutlierBounds>) -> String {
    match bounds {
        Some(b) => format!(
            "Outlier bounds ({} x{}): [{}, {}]",
            b.method,
            format_number(b.factor),
            format_number(b.lower),
            format_number(b.upper)
        ),
        None => "Outlier bounds: none (no numeric results, all rows kept)".to_string(),
    }
}

/// Fixed four-decimal rendering with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    let text = format!("{value:.4}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn counts_table(result: &PrepareResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Partition"),
        header_cell("Rows"),
        header_cell("After filters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Inliers").fg(Color::Green),
        Cell::new(result.inlier_rows),
        Cell::new(result.filtered_inlier_rows),
    ]);
    table.add_row(vec![
        Cell::new("Outliers").fg(Color::Red),
        Cell::new(result.outlier_rows),
        Cell::new(result.filtered_outlier_rows),
    ]);
    table.add_row(vec![
        Cell::new("No numeric result").fg(Color::DarkGrey),
        Cell::new(result.excluded_rows()),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn statistics_table(result: &PrepareResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let number = |value: Option<f64>| match value {
        Some(v) => Cell::new(format_number(v)),
        None => dim_cell("-"),
    };
    let stats = result.stats.as_ref();
    table.add_row(vec![
        Cell::new("Count"),
        Cell::new(stats.map_or(0, |s| s.count)),
    ]);
    table.add_row(vec![Cell::new("Mean"), number(stats.map(|s| s.mean))]);
    table.add_row(vec![Cell::new("Std dev"), number(stats.and_then(|s| s.std))]);
    table.add_row(vec![Cell::new("Min"), number(stats.map(|s| s.min))]);
    table.add_row(vec![Cell::new("Max"), number(stats.map(|s| s.max))]);
    table.add_row(vec![Cell::new("LSL"), number(result.limits.lower)]);
    table.add_row(vec![Cell::new("USL"), number(result.limits.upper)]);
    let capability = result.capability.as_ref();
    table.add_row(vec![Cell::new("Cp"), number(capability.and_then(|c| c.cp))]);
    table.add_row(vec![Cell::new("Cpk"), number(capability.map(|c| c.cpk))]);
    table
}

fn pareto_table(entries: &[ParetoEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Out of spec test"),
        header_cell("Count"),
        header_cell("Cumulative %"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.test),
            Cell::new(entry.count).fg(Color::Red),
            Cell::new(format!("{:.1}", entry.cumulative_percent)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn date_cell(date: Option<NaiveDate>) -> Cell {
    match date {
        Some(d) => Cell::new(d.format(DATE_FORMAT)),
        None => dim_cell("-"),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(v) => Cell::new(v),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
