//! Configuration options for profile quality control.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// A standard pressure level and the largest bracket gap allowed around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardLevel {
    /// Standard pressure in hPa.
    pub pressure_hpa: i32,
    /// Maximum distance (hPa) between the standard level and a bracketing
    /// significant level for interpolation to be trusted.
    pub big_gap_hpa: f32,
}

impl StandardLevel {
    pub const fn new(pressure_hpa: i32, big_gap_hpa: f32) -> Self {
        Self {
            pressure_hpa,
            big_gap_hpa,
        }
    }
}

/// WMO standard levels with the gap limits of the Guide on the Global
/// Data-Processing System (section 6.3.2.2.2), reduced to 50 hPa from 150 hPa up.
pub const DEFAULT_STANDARD_LEVELS: &[StandardLevel] = &[
    StandardLevel::new(1000, 150.0),
    StandardLevel::new(925, 150.0),
    StandardLevel::new(850, 150.0),
    StandardLevel::new(700, 150.0),
    StandardLevel::new(500, 100.0),
    StandardLevel::new(400, 100.0),
    StandardLevel::new(300, 100.0),
    StandardLevel::new(250, 75.0),
    StandardLevel::new(200, 75.0),
    StandardLevel::new(150, 50.0),
    StandardLevel::new(100, 50.0),
    StandardLevel::new(70, 50.0),
    StandardLevel::new(50, 50.0),
    StandardLevel::new(30, 50.0),
    StandardLevel::new(20, 50.0),
    StandardLevel::new(10, 50.0),
];

/// Options controlling profile QC.
///
/// The interpolation thresholds keep their operational key names so that
/// existing configuration files load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcOptions {
    /// Checks to run, in order.
    pub checks: Vec<String>,

    /// Only the first `max_levels` levels of each profile are checked.
    pub max_levels: Option<usize>,

    /// Standard pressure levels and their big-gap limits.
    pub standard_levels: Vec<StandardLevel>,

    /// Gap (Pa) used for standard levels above every table entry.
    #[serde(rename = "ICheck_BigGapInit")]
    pub big_gap_init: f32,

    /// Base temperature tolerance (K) for the interpolation check.
    #[serde(rename = "ICheck_TInterpTol")]
    pub t_interp_tol: f32,

    /// Multiplier applied to the tolerance at pressures below `tol_relax_p_thresh`.
    #[serde(rename = "ICheck_TolRelax")]
    pub tol_relax: f32,

    /// Pressure (Pa) below which the tolerance is relaxed.
    #[serde(rename = "ICheck_TolRelaxPThresh")]
    pub tol_relax_p_thresh: f32,

    /// Compare the exported working state of each check with reference values.
    pub compare_with_reference: bool,

    /// Absolute tolerance for float comparisons against reference values.
    pub comparison_tolerance: f32,
}

impl Default for QcOptions {
    fn default() -> Self {
        Self {
            checks: vec!["Interpolation".to_string()],
            max_levels: None,
            standard_levels: DEFAULT_STANDARD_LEVELS.to_vec(),
            big_gap_init: 1000.0,
            t_interp_tol: 8.0,
            tol_relax: 1.5,
            tol_relax_p_thresh: 30000.0,
            compare_with_reference: false,
            comparison_tolerance: 0.1,
        }
    }
}

impl QcOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checks<I, S>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks = checks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_standard_levels(mut self, levels: Vec<StandardLevel>) -> Self {
        self.standard_levels = levels;
        self
    }

    pub fn with_max_levels(mut self, max_levels: Option<usize>) -> Self {
        self.max_levels = max_levels;
        self
    }

    pub fn with_reference_comparison(mut self, enable: bool) -> Self {
        self.compare_with_reference = enable;
        self
    }

    /// Tolerance (K) applied at a level of pressure `pressure_pa`.
    ///
    /// The relaxation applies strictly below the threshold; a level exactly
    /// at the threshold uses the base tolerance.
    pub fn interpolation_tolerance(&self, pressure_pa: f32) -> f32 {
        if pressure_pa < self.tol_relax_p_thresh {
            self.t_interp_tol * self.tol_relax
        } else {
            self.t_interp_tol
        }
    }

    /// Reject option sets the checks cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.standard_levels.is_empty() {
            return Err(invalid("standard_levels must not be empty"));
        }
        let mut seen = BTreeSet::new();
        for level in &self.standard_levels {
            if level.pressure_hpa <= 0 {
                return Err(invalid(format!(
                    "standard level pressure must be positive, got {} hPa",
                    level.pressure_hpa
                )));
            }
            if !is_positive(level.big_gap_hpa) {
                return Err(invalid(format!(
                    "big gap for {} hPa must be positive",
                    level.pressure_hpa
                )));
            }
            if !seen.insert(level.pressure_hpa) {
                return Err(invalid(format!(
                    "duplicate standard level: {} hPa",
                    level.pressure_hpa
                )));
            }
        }
        if !is_positive(self.big_gap_init) {
            return Err(invalid("ICheck_BigGapInit must be positive"));
        }
        if !is_positive(self.t_interp_tol) || !is_positive(self.tol_relax) {
            return Err(invalid(
                "ICheck_TInterpTol and ICheck_TolRelax must be positive",
            ));
        }
        if self.comparison_tolerance < 0.0 {
            return Err(invalid("comparison_tolerance must not be negative"));
        }
        if self.max_levels == Some(0) {
            return Err(invalid("max_levels must be at least 1 when set"));
        }
        Ok(())
    }
}

// NaN is not positive.
fn is_positive(value: f32) -> bool {
    value > 0.0
}

fn invalid(message: impl Into<String>) -> ProfileError {
    ProfileError::InvalidOptions {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        QcOptions::default().validate().expect("default options");
    }

    #[test]
    fn relaxation_boundary_uses_base_tolerance() {
        let options = QcOptions::default();
        assert_eq!(options.interpolation_tolerance(30000.0), 8.0);
        assert_eq!(options.interpolation_tolerance(29999.0), 12.0);
        assert_eq!(options.interpolation_tolerance(85000.0), 8.0);
    }

    #[test]
    fn rejects_duplicate_levels() {
        let options = QcOptions::default().with_standard_levels(vec![
            StandardLevel::new(700, 100.0),
            StandardLevel::new(700, 50.0),
        ]);
        assert!(matches!(
            options.validate(),
            Err(ProfileError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_gap() {
        let options =
            QcOptions::default().with_standard_levels(vec![StandardLevel::new(500, 0.0)]);
        assert!(options.validate().is_err());
    }
}
