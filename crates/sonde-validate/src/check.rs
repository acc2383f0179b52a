//! The capability shared by every profile check.

use sonde_model::{ProfileDataHandler, QcOptions, Result};

use crate::indices::ProfileIndices;
use crate::validator::ProfileCheckValidator;

/// Result of a single `run_check` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The algorithm ran; flags and counters may have changed.
    Completed,
    /// Inputs were empty or misaligned; nothing was modified.
    Skipped,
}

/// Collaborators a check is constructed with.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub options: &'a QcOptions,
    pub indices: &'a ProfileIndices,
    pub validator: &'a ProfileCheckValidator,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        options: &'a QcOptions,
        indices: &'a ProfileIndices,
        validator: &'a ProfileCheckValidator,
    ) -> Self {
        Self {
            options,
            indices,
            validator,
        }
    }
}

/// A unit of QC logic over one profile.
///
/// The profile data is lent to each call rather than held by the check.
/// `run_check` is meant to be called once per profile: a second call on the
/// same data repeats the flagging and adds to the counters again.
pub trait ProfileCheck {
    /// Registry key of the check.
    fn name(&self) -> &'static str;

    /// Run the algorithm, updating flags and counters in `data`.
    ///
    /// Missing variables are contract violations and return an error;
    /// data-quality problems with the inputs return [`CheckOutcome::Skipped`].
    fn run_check(&mut self, data: &mut ProfileDataHandler) -> Result<CheckOutcome>;

    /// Publish the working state of the last `run_check` into `data`.
    fn fill_validator(&self, data: &mut ProfileDataHandler);

    /// Names written by `fill_validator`.
    fn validator_variables(&self) -> &'static [&'static str];
}
