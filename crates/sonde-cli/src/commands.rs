use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use sonde_cli::pipeline::{OptionOverrides, check_profiles, resolve_options};
use sonde_cli::report::{write_flagged_csv, write_report_json};
use sonde_cli::types::RunResult;
use sonde_ingest::read_profiles;
use sonde_validate::default_registry;

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, header_cell};

pub fn list_checks() -> Result<()> {
    let registry = default_registry();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Description")]);
    apply_table_style(&mut table);
    for key in registry.keys() {
        table.add_row(vec![key, registry.description(key).unwrap_or_default()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_profiles(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();

    let overrides = OptionOverrides {
        checks: args.checks.clone(),
        max_levels: args.max_levels,
        compare_with_reference: args.compare_reference,
    };
    let options = resolve_options(args.options.as_deref(), &overrides)?;
    let records = read_profiles(&args.input)
        .with_context(|| format!("read profiles from {}", args.input.display()))?;
    info!(profiles = records.len(), checks = ?options.checks, "running checks");

    let profiles = check_profiles(records, &options, default_registry())?;

    if let Some(path) = &args.report {
        write_report_json(path, &args.input, &options, &profiles)?;
        info!(path = %path.display(), "wrote report");
    }
    if let Some(path) = &args.output {
        write_flagged_csv(path, &profiles)?;
        info!(path = %path.display(), "wrote flagged levels");
    }

    Ok(RunResult {
        input: args.input.clone(),
        profiles,
        report: args.report.clone(),
        output: args.output.clone(),
    })
}
