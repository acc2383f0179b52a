use std::path::PathBuf;

use sonde_model::{ProfileDataHandler, ProfileQcSummary};

/// One profile after QC, with the data the checks wrote into it.
#[derive(Debug, Clone)]
pub struct ProfileRun {
    pub summary: ProfileQcSummary,
    pub data: ProfileDataHandler,
}

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub profiles: Vec<ProfileRun>,
    pub report: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl RunResult {
    pub fn has_mismatches(&self) -> bool {
        self.profiles
            .iter()
            .any(|profile| profile.summary.has_mismatches())
    }
}
