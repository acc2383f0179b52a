//! Library components of the `sonde-qc` command-line runner.

pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;
