//! Option resolution and per-profile QC, independent of argument parsing.

use std::path::Path;

use anyhow::{Context, Result, bail};
use sonde_ingest::{ProfileRecord, load_options};
use sonde_model::QcOptions;
use sonde_validate::{CheckRegistry, ProfileCheckValidator, run_profile};
use tracing::info;

use crate::types::ProfileRun;

/// Overrides given on the command line, applied on top of the options file.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub checks: Option<Vec<String>>,
    pub max_levels: Option<usize>,
    pub compare_with_reference: bool,
}

/// Load options from `path` (or defaults) and apply `overrides`.
pub fn resolve_options(path: Option<&Path>, overrides: &OptionOverrides) -> Result<QcOptions> {
    let mut options = match path {
        Some(path) => load_options(path).context("load options")?,
        None => QcOptions::default(),
    };
    if let Some(checks) = &overrides.checks {
        options = options.with_checks(checks.iter().cloned());
    }
    if overrides.max_levels.is_some() {
        options = options.with_max_levels(overrides.max_levels);
    }
    if overrides.compare_with_reference {
        options = options.with_reference_comparison(true);
    }
    options.validate().context("validate options")?;
    Ok(options)
}

/// Run the configured checks over every profile.
///
/// Fails before touching any profile when a configured check is not
/// registered.
pub fn check_profiles(
    records: Vec<ProfileRecord>,
    options: &QcOptions,
    registry: &CheckRegistry,
) -> Result<Vec<ProfileRun>> {
    if let Some(unknown) = options.checks.iter().find(|key| !registry.contains(key)) {
        let known: Vec<&str> = registry.keys().collect();
        bail!("unknown check '{unknown}' (available: {})", known.join(", "));
    }
    let mut runs = Vec::with_capacity(records.len());
    for record in records {
        let ProfileRecord {
            id,
            mut data,
            reference,
        } = record;
        let validator = ProfileCheckValidator::new(reference, options.comparison_tolerance);
        let summary = run_profile(&id, &mut data, options, &validator, registry)
            .with_context(|| format!("check profile {id}"))?;
        runs.push(ProfileRun { summary, data });
    }
    info!(profiles = runs.len(), "quality control complete");
    Ok(runs)
}
