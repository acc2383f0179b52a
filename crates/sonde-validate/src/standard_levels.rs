//! Standard and significant level bookkeeping shared by profile checks.
//!
//! A usable level (finite value present, positive pressure, not a surface
//! report) whose pressure rounds to an entry of the standard level table is a
//! standard level. Every other usable level is a significant level. Each
//! standard level is bracketed by the nearest significant level on either
//! side in index order.

use sonde_model::flags::{self, SURFACE_LEVEL};
use sonde_model::{MISSING_FLOAT, StandardLevel};

use crate::util::round_to_hpa;

/// Sentinel used for "no level" in exported index arrays.
pub const NOT_FOUND: i32 = -1;

/// A profile level matched to an entry of the standard level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardLevelMatch {
    /// Index of the level in the profile.
    pub level: usize,
    /// Index of the matched entry in the standard level table.
    pub table_index: usize,
    /// Nearest significant level at a lower index.
    pub sig_below: Option<usize>,
    /// Nearest significant level at a higher index.
    pub sig_above: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardLevels {
    table: Vec<StandardLevel>,
    matches: Vec<StandardLevelMatch>,
    log_p: Vec<f32>,
    num_sig: usize,
    num_levels: usize,
}

impl StandardLevels {
    pub fn new(table: Vec<StandardLevel>) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    /// Locate standard levels and their significant-level brackets.
    ///
    /// When two levels round to the same standard pressure the first one in
    /// index order is the standard level and the later one is treated as a
    /// significant level. Results therefore depend on level order.
    pub fn calc_std_levels(
        &mut self,
        num_levels_to_check: usize,
        pressures: &[f32],
        values: &[f32],
        level_flags: &[i32],
    ) {
        let num_levels = num_levels_to_check
            .min(pressures.len())
            .min(values.len())
            .min(level_flags.len());
        self.num_levels = num_levels;
        self.matches.clear();
        self.log_p = vec![0.0; num_levels];

        let mut matched = vec![false; self.table.len()];
        let mut significant = Vec::new();
        for jlev in 0..num_levels {
            let pressure = pressures[jlev];
            if !is_present(values[jlev]) || !is_present(pressure) || pressure <= 0.0 {
                continue;
            }
            self.log_p[jlev] = pressure.ln();
            if flags::has_flag(level_flags[jlev], SURFACE_LEVEL) {
                continue;
            }

            let rounded = round_to_hpa(pressure);
            let table_index = self
                .table
                .iter()
                .position(|level| level.pressure_hpa == rounded)
                .filter(|&index| !matched[index]);
            match table_index {
                Some(index) => {
                    matched[index] = true;
                    self.matches.push(StandardLevelMatch {
                        level: jlev,
                        table_index: index,
                        sig_below: None,
                        sig_above: None,
                    });
                }
                None => significant.push(jlev),
            }
        }

        self.num_sig = significant.len();
        for entry in &mut self.matches {
            entry.sig_below = significant
                .iter()
                .rev()
                .find(|&&sig| sig < entry.level)
                .copied();
            entry.sig_above = significant.iter().find(|&&sig| sig > entry.level).copied();
        }
    }

    pub fn matches(&self) -> &[StandardLevelMatch] {
        &self.matches
    }

    pub fn num_std(&self) -> usize {
        self.matches.len()
    }

    pub fn num_sig(&self) -> usize {
        self.num_sig
    }

    /// Natural log of pressure per level; 0.0 where the level is unusable.
    pub fn log_p(&self) -> &[f32] {
        &self.log_p
    }

    /// Number of levels covered by the last calculation.
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// Largest bracket gap (Pa) allowed around a standard level at `pressure_hpa`.
    ///
    /// Uses the first table entry at or below the given pressure, falling back
    /// to `default_pa` when there is none.
    pub fn big_gap(&self, pressure_hpa: i32, default_pa: f32) -> f32 {
        self.table
            .iter()
            .find(|level| level.pressure_hpa <= pressure_hpa)
            .map_or(default_pa, |level| level.big_gap_hpa * 100.0)
    }

    /// Profile level index of each standard level, padded with [`NOT_FOUND`].
    pub fn std_lev_array(&self) -> Vec<i32> {
        self.padded(|entry| Some(entry.level))
    }

    pub fn sig_below_array(&self) -> Vec<i32> {
        self.padded(|entry| entry.sig_below)
    }

    pub fn sig_above_array(&self) -> Vec<i32> {
        self.padded(|entry| entry.sig_above)
    }

    /// Table index of each standard level's pressure, padded with [`NOT_FOUND`].
    pub fn ind_std_array(&self) -> Vec<i32> {
        self.padded(|entry| Some(entry.table_index))
    }

    fn padded(&self, pick: impl Fn(&StandardLevelMatch) -> Option<usize>) -> Vec<i32> {
        let mut out = vec![NOT_FOUND; self.num_levels];
        for (slot, entry) in self.matches.iter().enumerate() {
            out[slot] = pick(entry).map_or(NOT_FOUND, to_i32);
        }
        out
    }
}

/// NaN and infinities are as unusable as the missing sentinel.
fn is_present(value: f32) -> bool {
    value.is_finite() && value != MISSING_FLOAT
}

fn to_i32(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(NOT_FOUND)
}
