use sonde_model::names::AIR_PRESSURE;
use sonde_model::{ProfileDataHandler, QcOptions, Result};

/// Levels of one profile that are subject to QC.
///
/// Computed once per profile before any check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileIndices {
    num_levels: usize,
    num_levels_to_check: usize,
}

impl ProfileIndices {
    pub fn new(data: &ProfileDataHandler, options: &QcOptions) -> Result<Self> {
        let num_levels = data.get::<f32>(AIR_PRESSURE)?.len();
        let num_levels_to_check = match options.max_levels {
            Some(max) => num_levels.min(max),
            None => num_levels,
        };
        Ok(Self {
            num_levels,
            num_levels_to_check,
        })
    }

    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    pub fn num_levels_to_check(&self) -> usize {
        self.num_levels_to_check
    }
}
