use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A computed value that disagrees with its reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMismatch {
    /// Check that exported the variable.
    pub check: String,
    pub variable: String,
    /// Level index, or `None` when the lengths differ.
    pub level: Option<usize>,
    pub expected: String,
    pub actual: String,
}

/// Outcome of running the configured checks on one profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileQcSummary {
    #[serde(rename = "profile")]
    pub profile_id: String,
    pub num_levels: usize,
    pub checks_run: Vec<String>,
    /// Checks that refused to run because their inputs were empty or misaligned.
    pub checks_skipped: Vec<String>,
    pub counters: BTreeMap<String, i32>,
    /// Levels carrying at least one flag bit set by a check in this run.
    pub flagged_levels: usize,
    /// Working-state variables published by the checks, in publication order.
    #[serde(default)]
    pub exported: Vec<String>,
    pub mismatches: Vec<ReferenceMismatch>,
}

impl ProfileQcSummary {
    pub fn new(profile_id: impl Into<String>, num_levels: usize) -> Self {
        Self {
            profile_id: profile_id.into(),
            num_levels,
            ..Self::default()
        }
    }

    pub fn counter(&self, name: &str) -> i32 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }
}
