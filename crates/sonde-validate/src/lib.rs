//! Consistency checks for vertical profiles.
//!
//! A check is built from a [`CheckContext`] through the [`CheckRegistry`] and
//! run against a [`sonde_model::ProfileDataHandler`] lent to it per call.
//! [`run_profile`] drives the configured checks over one profile.

pub mod check;
pub mod checks;
pub mod indices;
pub mod registry;
pub mod runner;
pub mod standard_levels;
pub mod util;
pub mod validator;

pub use check::{CheckContext, CheckOutcome, ProfileCheck};
pub use checks::InterpolationCheck;
pub use indices::ProfileIndices;
pub use registry::{CheckFactory, CheckRegistry, default_registry, register_builtin_checks};
pub use runner::run_profile;
pub use standard_levels::{NOT_FOUND, StandardLevelMatch, StandardLevels};
pub use validator::ProfileCheckValidator;
