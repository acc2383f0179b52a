//! Comparison of exported check state against reference values.

use sonde_model::{
    MISSING_FLOAT, MISSING_INT, ProfileDataHandler, ReferenceMismatch, ValueKind, value_kind,
};
use tracing::{debug, warn};

/// Reference sequences to compare exported working state against.
#[derive(Debug, Clone, Default)]
pub struct ProfileCheckValidator {
    reference: ProfileDataHandler,
    tolerance: f32,
}

impl ProfileCheckValidator {
    pub fn new(reference: ProfileDataHandler, tolerance: f32) -> Self {
        Self {
            reference,
            tolerance,
        }
    }

    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Compare each of `variables` in `data` against the reference.
    ///
    /// Variables without a reference are not compared. Missing reference
    /// elements are ignored; floats match within the tolerance and integers
    /// must be equal.
    pub fn validate(
        &self,
        check: &str,
        variables: &[&str],
        data: &ProfileDataHandler,
    ) -> Vec<ReferenceMismatch> {
        let mut mismatches = Vec::new();
        for &variable in variables {
            if !self.reference.contains(variable) {
                debug!(check, variable, "no reference values");
                continue;
            }
            let found = match value_kind(variable) {
                ValueKind::Float => self.compare(
                    check,
                    variable,
                    data,
                    MISSING_FLOAT,
                    |expected: f32, actual: f32| {
                        actual != MISSING_FLOAT && (expected - actual).abs() <= self.tolerance
                    },
                ),
                ValueKind::Int => {
                    self.compare(check, variable, data, MISSING_INT, |expected: i32, actual| {
                        expected == actual
                    })
                }
            };
            if !found.is_empty() {
                warn!(
                    check,
                    variable,
                    mismatches = found.len(),
                    "values differ from reference"
                );
            }
            mismatches.extend(found);
        }
        mismatches
    }

    fn compare<T, F>(
        &self,
        check: &str,
        variable: &str,
        data: &ProfileDataHandler,
        missing: T,
        matches: F,
    ) -> Vec<ReferenceMismatch>
    where
        T: sonde_model::ProfileValue + ToString,
        F: Fn(T, T) -> bool,
    {
        let mismatch = |level, expected: String, actual: String| ReferenceMismatch {
            check: check.to_string(),
            variable: variable.to_string(),
            level,
            expected,
            actual,
        };
        let Ok(expected) = self.reference.get::<T>(variable) else {
            return vec![mismatch(None, "reference".to_string(), "wrong type".to_string())];
        };
        let Ok(actual) = data.get::<T>(variable) else {
            return vec![mismatch(None, "present".to_string(), "missing".to_string())];
        };
        if expected.len() != actual.len() {
            return vec![mismatch(
                None,
                format!("{} values", expected.len()),
                format!("{} values", actual.len()),
            )];
        }
        expected
            .iter()
            .zip(actual)
            .enumerate()
            .filter(|&(_, (&want, &got))| want != missing && !matches(want, got))
            .map(|(level, (want, got))| mismatch(Some(level), want.to_string(), got.to_string()))
            .collect()
    }
}
