//! JSON report and flagged per-level CSV output.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use sonde_model::flags::flag_names;
use sonde_model::names::{AIR_PRESSURE, LEV_ERRORS, OBS_AIR_TEMPERATURE, QC_T_FLAGS, T_INTERP};
use sonde_model::{
    MISSING_FLOAT, MISSING_INT, ProfileDataHandler, ProfileQcSummary, QcOptions, ValueKind,
    value_kind,
};

use crate::types::ProfileRun;

const REPORT_SCHEMA: &str = "sonde-qc.report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct ReportPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub input: String,
    pub options: &'a QcOptions,
    pub profiles: Vec<ProfileReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ProfileReport<'a> {
    #[serde(flatten)]
    pub summary: &'a ProfileQcSummary,
    /// Exported working state keyed by variable; missing values are null.
    pub validator: BTreeMap<&'a str, Value>,
}

pub fn build_report<'a>(
    input: &Path,
    options: &'a QcOptions,
    runs: &'a [ProfileRun],
) -> ReportPayload<'a> {
    ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        input: input.display().to_string(),
        options,
        profiles: runs
            .iter()
            .map(|run| ProfileReport {
                summary: &run.summary,
                validator: run
                    .summary
                    .exported
                    .iter()
                    .filter_map(|name| {
                        exported_values(&run.data, name).map(|values| (name.as_str(), values))
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Write the JSON report for `runs` to `path`.
pub fn write_report_json(
    path: &Path,
    input: &Path,
    options: &QcOptions,
    runs: &[ProfileRun],
) -> Result<()> {
    let payload = build_report(input, options, runs);
    let json = serde_json::to_string_pretty(&payload).context("serialize report")?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

fn exported_values(data: &ProfileDataHandler, name: &str) -> Option<Value> {
    match value_kind(name) {
        ValueKind::Float => data.get::<f32>(name).ok().map(|values| {
            values
                .iter()
                .map(|&value| if value == MISSING_FLOAT { Value::Null } else { json!(value) })
                .collect()
        }),
        ValueKind::Int => data.get::<i32>(name).ok().map(|values| {
            values
                .iter()
                .map(|&value| if value == MISSING_INT { Value::Null } else { json!(value) })
                .collect()
        }),
    }
}

const CSV_HEADER: &[&str] = &[
    "profile_id",
    "level",
    AIR_PRESSURE,
    OBS_AIR_TEMPERATURE,
    QC_T_FLAGS,
    "flag_names",
    LEV_ERRORS,
    T_INTERP,
];

/// Write one row per level with its flags and interpolation state.
pub fn write_flagged_csv(path: &Path, runs: &[ProfileRun]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create output {}", path.display()))?;
    writer.write_record(CSV_HEADER)?;
    for run in runs {
        let data = &run.data;
        let pressures = floats(data, AIR_PRESSURE);
        let t_obs = floats(data, OBS_AIR_TEMPERATURE);
        let flags = ints(data, QC_T_FLAGS);
        let lev_errors = ints(data, LEV_ERRORS);
        let t_interp = floats(data, T_INTERP);
        for level in 0..run.summary.num_levels {
            let flag = flags.get(level).copied().unwrap_or(0);
            writer.write_record([
                run.summary.profile_id.clone(),
                level.to_string(),
                float_cell(pressures.get(level)),
                float_cell(t_obs.get(level)),
                flag.to_string(),
                flag_names(flag).join("|"),
                int_cell(lev_errors.get(level)),
                float_cell(t_interp.get(level)),
            ])?;
        }
    }
    writer
        .flush()
        .with_context(|| format!("write output {}", path.display()))?;
    Ok(())
}

fn floats<'a>(data: &'a ProfileDataHandler, name: &str) -> &'a [f32] {
    data.get::<f32>(name).unwrap_or_default()
}

fn ints<'a>(data: &'a ProfileDataHandler, name: &str) -> &'a [i32] {
    data.get::<i32>(name).unwrap_or_default()
}

fn float_cell(value: Option<&f32>) -> String {
    match value {
        Some(&value) if value != MISSING_FLOAT => value.to_string(),
        _ => String::new(),
    }
}

fn int_cell(value: Option<&i32>) -> String {
    match value {
        Some(&value) if value != MISSING_INT => value.to_string(),
        _ => String::new(),
    }
}
