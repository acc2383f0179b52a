//! Runs the configured checks over one profile.

use sonde_model::names::{COUNTERS, QC_T_FLAGS};
use sonde_model::{ProfileDataHandler, ProfileQcSummary, QcOptions, Result};
use tracing::{debug, info, info_span};

use crate::check::{CheckContext, CheckOutcome, ProfileCheck};
use crate::indices::ProfileIndices;
use crate::registry::CheckRegistry;
use crate::validator::ProfileCheckValidator;

/// Run every check named in `options.checks`, in order, on `data`.
///
/// Derived sequences are initialised first. Every check is resolved before
/// any of them runs, so an unknown key leaves the profile untouched. Each
/// check exports its working state into `data` after running.
pub fn run_profile(
    profile_id: &str,
    data: &mut ProfileDataHandler,
    options: &QcOptions,
    validator: &ProfileCheckValidator,
    registry: &CheckRegistry,
) -> Result<ProfileQcSummary> {
    let _span = info_span!("profile", id = profile_id).entered();

    let indices = ProfileIndices::new(data, options)?;
    let ctx = CheckContext::new(options, &indices, validator);
    let mut checks: Vec<Box<dyn ProfileCheck + '_>> = options
        .checks
        .iter()
        .map(|key| registry.create(key, &ctx))
        .collect::<Result<_>>()?;

    data.initialise_derived(indices.num_levels());
    let flags_before = data.get::<i32>(QC_T_FLAGS)?.to_vec();

    let mut summary = ProfileQcSummary::new(profile_id, indices.num_levels());
    for check in &mut checks {
        let name = check.name();
        match check.run_check(data)? {
            CheckOutcome::Completed => summary.checks_run.push(name.to_string()),
            CheckOutcome::Skipped => summary.checks_skipped.push(name.to_string()),
        }
        check.fill_validator(data);
        for &variable in check.validator_variables() {
            if !summary.exported.iter().any(|name| name == variable) {
                summary.exported.push(variable.to_string());
            }
        }
        if options.compare_with_reference && validator.has_reference() {
            let mismatches = validator.validate(name, check.validator_variables(), data);
            debug!(check = name, mismatches = mismatches.len(), "reference comparison");
            summary.mismatches.extend(mismatches);
        }
    }

    for counter in COUNTERS {
        summary
            .counters
            .insert((*counter).to_string(), data.counter(counter)?);
    }
    let flags_after = data.get::<i32>(QC_T_FLAGS)?;
    summary.flagged_levels = flags_after
        .iter()
        .zip(flags_before.iter().chain(std::iter::repeat(&0)))
        .filter(|&(&after, &before)| after & !before != 0)
        .count();

    info!(
        levels = summary.num_levels,
        flagged = summary.flagged_levels,
        skipped = summary.checks_skipped.len(),
        mismatches = summary.mismatches.len(),
        "profile checked"
    );
    Ok(summary)
}
