//! Names of the per-level sequences exchanged through the data handler.

use serde::{Deserialize, Serialize};

pub const AIR_PRESSURE: &str = "air_pressure";
pub const OBS_AIR_TEMPERATURE: &str = "obs_air_temperature";
pub const HOFX_AIR_TEMPERATURE: &str = "hofx_air_temperature";
pub const QC_T_FLAGS: &str = "qc_tFlags";
pub const T_OBS_CORRECTION: &str = "tObsCorrection";

pub const COUNTER_NUM_ANY_ERRORS: &str = "counter_NumAnyErrors";
pub const COUNTER_NUM_INTERP_ERRORS: &str = "counter_NumInterpErrors";
pub const COUNTER_NUM_INTERP_ERR_OBS: &str = "counter_NumInterpErrObs";

/// Counters shared by the check family, in report order.
pub const COUNTERS: &[&str] = &[
    COUNTER_NUM_ANY_ERRORS,
    COUNTER_NUM_INTERP_ERRORS,
    COUNTER_NUM_INTERP_ERR_OBS,
];

pub const STD_LEV: &str = "StdLev";
pub const SIG_ABOVE: &str = "SigAbove";
pub const SIG_BELOW: &str = "SigBelow";
pub const IND_STD: &str = "IndStd";
pub const LEV_ERRORS: &str = "LevErrors";
pub const T_INTERP: &str = "tInterp";
pub const LOG_P: &str = "LogP";
pub const NUM_STD: &str = "NumStd";
pub const NUM_SIG: &str = "NumSig";

/// Integer-valued outputs published by `fill_validator`.
const INT_OUTPUTS: &[&str] = &[
    STD_LEV, SIG_ABOVE, SIG_BELOW, IND_STD, LEV_ERRORS, NUM_STD, NUM_SIG,
];

/// Element type of a named sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Int,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Int => "int",
        }
    }
}

/// Classify a variable by name: flags, counters and level indices are integers.
pub fn value_kind(name: &str) -> ValueKind {
    if name.starts_with("qc_") || name.starts_with("counter_") || INT_OUTPUTS.contains(&name) {
        ValueKind::Int
    } else {
        ValueKind::Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_flags_and_counters_as_int() {
        assert_eq!(value_kind(QC_T_FLAGS), ValueKind::Int);
        assert_eq!(value_kind(COUNTER_NUM_INTERP_ERRORS), ValueKind::Int);
        assert_eq!(value_kind(SIG_BELOW), ValueKind::Int);
        assert_eq!(value_kind(NUM_SIG), ValueKind::Int);
    }

    #[test]
    fn classifies_measurements_as_float() {
        assert_eq!(value_kind(AIR_PRESSURE), ValueKind::Float);
        assert_eq!(value_kind(T_OBS_CORRECTION), ValueKind::Float);
        assert_eq!(value_kind(T_INTERP), ValueKind::Float);
        assert_eq!(value_kind(LOG_P), ValueKind::Float);
    }
}
