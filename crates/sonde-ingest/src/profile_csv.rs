//! Loading profiles from CSV.
//!
//! One row is one level. An optional `profile_id` column splits the rows
//! into profiles in first-seen order; without it the whole file is one
//! profile named after the file stem. Columns prefixed with `ref_` hold
//! reference values for the check validator.

use std::collections::HashMap;
use std::path::Path;

use polars::prelude::{AnyValue, Column, CsvReadOptions, DataFrame, SerReader};
use sonde_model::{MISSING_FLOAT, MISSING_INT, ProfileDataHandler, ValueKind, value_kind};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Column that groups rows into profiles.
pub const PROFILE_ID_COLUMN: &str = "profile_id";

/// Prefix of columns holding reference values.
pub const REFERENCE_PREFIX: &str = "ref_";

const FLAG_PREFIX: &str = "qc_";

/// One profile read from a CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRecord {
    pub id: String,
    pub data: ProfileDataHandler,
    /// Expected validator output, from `ref_` columns.
    pub reference: ProfileDataHandler,
}

/// Read every profile in the CSV file at `path`.
pub fn read_profiles(path: &Path) -> Result<Vec<ProfileRecord>> {
    let df = read_frame(path)?;
    let groups = group_rows(&df, path)?;
    let mut records = Vec::with_capacity(groups.len());
    for (id, rows) in groups {
        let mut record = ProfileRecord {
            id,
            ..ProfileRecord::default()
        };
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == PROFILE_ID_COLUMN {
                continue;
            }
            let (target, variable) = match name.strip_prefix(REFERENCE_PREFIX) {
                Some(variable) => (&mut record.reference, variable),
                None => (&mut record.data, name),
            };
            match value_kind(variable) {
                ValueKind::Float => target.set(variable, float_values(column, &rows, path)?),
                ValueKind::Int => {
                    let empty = if is_flag_variable(variable) { 0 } else { MISSING_INT };
                    target.set(variable, int_values(column, &rows, empty, path)?);
                }
            }
        }
        debug!(profile = %record.id, levels = rows.len(), "read profile");
        records.push(record);
    }
    info!(path = %path.display(), profiles = records.len(), "loaded profiles");
    Ok(records)
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Row indices of each profile, in first-seen order.
fn group_rows(df: &DataFrame, path: &Path) -> Result<Vec<(String, Vec<usize>)>> {
    let Ok(ids) = df.column(PROFILE_ID_COLUMN) else {
        let id = path.file_stem().map_or_else(
            || "profile".to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        return Ok(vec![(id, (0..df.height()).collect())]);
    };

    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for row in 0..df.height() {
        let id = any_to_string(ids.get(row).unwrap_or(AnyValue::Null));
        if id.is_empty() {
            let message = format!("empty id in row {}", row + 1);
            return Err(column_error(path, PROFILE_ID_COLUMN, message));
        }
        match positions.get(&id) {
            Some(&position) => groups[position].1.push(row),
            None => {
                positions.insert(id.clone(), groups.len());
                groups.push((id, vec![row]));
            }
        }
    }
    Ok(groups)
}

fn float_values(column: &Column, rows: &[usize], path: &Path) -> Result<Vec<f32>> {
    rows.iter()
        .map(|&row| match column.get(row).unwrap_or(AnyValue::Null) {
            AnyValue::Null => Ok(MISSING_FLOAT),
            value => any_to_f64(&value)
                .map(|number| number as f32)
                .ok_or_else(|| invalid_cell(column, row, &value, path)),
        })
        .collect()
}

/// Blank cells of flag variables read as no bits set.
fn is_flag_variable(name: &str) -> bool {
    name.starts_with(FLAG_PREFIX)
}

fn int_values(column: &Column, rows: &[usize], empty: i32, path: &Path) -> Result<Vec<i32>> {
    rows.iter()
        .map(|&row| match column.get(row).unwrap_or(AnyValue::Null) {
            AnyValue::Null => Ok(empty),
            value => any_to_i64(&value)
                .and_then(|number| i32::try_from(number).ok())
                .ok_or_else(|| invalid_cell(column, row, &value, path)),
        })
        .collect()
}

fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => parse_number(s),
        AnyValue::StringOwned(s) => parse_number(s),
        _ => None,
    }
}

fn any_to_i64(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::Float64(v) if v.fract() == 0.0 => Some(*v as i64),
        AnyValue::String(s) => s.trim().parse().ok(),
        AnyValue::StringOwned(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

fn invalid_cell(column: &Column, row: usize, value: &AnyValue<'_>, path: &Path) -> IngestError {
    column_error(
        path,
        column.name().as_str(),
        format!("cannot store {value} from row {} as {}", row + 1, kind_of(column)),
    )
}

fn kind_of(column: &Column) -> &'static str {
    let name = column.name().as_str();
    let variable = name.strip_prefix(REFERENCE_PREFIX).unwrap_or(name);
    value_kind(variable).as_str()
}

fn column_error(path: &Path, column: &str, message: String) -> IngestError {
    IngestError::Column {
        path: path.to_path_buf(),
        column: column.to_string(),
        message,
    }
}
