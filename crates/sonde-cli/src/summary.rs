use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sonde_cli::types::RunResult;
use sonde_model::names::{COUNTER_NUM_ANY_ERRORS, COUNTER_NUM_INTERP_ERRORS};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    if let Some(path) = &result.output {
        println!("Flagged levels: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Levels"),
        header_cell("Checks"),
        header_cell("Skipped"),
        header_cell("Flagged"),
        header_cell("Any errors"),
        header_cell("Interp errors"),
        header_cell("Mismatches"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 2, CellAlignment::Left);
    align_column(&mut table, 3, CellAlignment::Left);

    let mut total_levels = 0usize;
    let mut total_flagged = 0usize;
    let mut total_any = 0i64;
    let mut total_interp = 0i64;
    let mut total_mismatches = 0usize;
    for profile in &result.profiles {
        let summary = &profile.summary;
        let any_errors = summary.counter(COUNTER_NUM_ANY_ERRORS);
        let interp_errors = summary.counter(COUNTER_NUM_INTERP_ERRORS);
        total_levels += summary.num_levels;
        total_flagged += summary.flagged_levels;
        total_any += i64::from(any_errors);
        total_interp += i64::from(interp_errors);
        total_mismatches += summary.mismatches.len();
        table.add_row(vec![
            Cell::new(&summary.profile_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.num_levels),
            list_cell(&summary.checks_run),
            skipped_cell(&summary.checks_skipped),
            count_cell(summary.flagged_levels, Color::Yellow),
            count_cell(any_errors, Color::Red),
            count_cell(interp_errors, Color::Red),
            count_cell(summary.mismatches.len(), Color::Magenta),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_levels).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(total_flagged, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_any, Color::Red).add_attribute(Attribute::Bold),
        count_cell(total_interp, Color::Red).add_attribute(Attribute::Bold),
        count_cell(total_mismatches, Color::Magenta).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_mismatch_table(result);
}

fn print_mismatch_table(result: &RunResult) {
    let mismatches: Vec<_> = result
        .profiles
        .iter()
        .flat_map(|profile| {
            profile
                .summary
                .mismatches
                .iter()
                .map(move |mismatch| (&profile.summary.profile_id, mismatch))
        })
        .collect();
    if mismatches.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Check"),
        header_cell("Variable"),
        header_cell("Level"),
        header_cell("Expected"),
        header_cell("Actual"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for (profile_id, mismatch) in mismatches {
        table.add_row(vec![
            Cell::new(profile_id),
            Cell::new(&mismatch.check),
            Cell::new(&mismatch.variable),
            mismatch
                .level
                .map_or_else(|| dim_cell("length"), Cell::new),
            Cell::new(&mismatch.expected),
            Cell::new(&mismatch.actual).fg(Color::Red),
        ]);
    }
    println!();
    println!("Reference mismatches:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell<T>(count: T, color: Color) -> Cell
where
    T: ToString + PartialOrd + Default,
{
    if count > T::default() {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn list_cell(names: &[String]) -> Cell {
    if names.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(names.join(", "))
    }
}

fn skipped_cell(names: &[String]) -> Cell {
    if names.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(names.join(", ")).fg(Color::Yellow)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
