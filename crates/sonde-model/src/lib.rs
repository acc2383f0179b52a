//! Data model for vertical profile quality control.

pub mod data;
pub mod error;
pub mod flags;
pub mod names;
pub mod options;
pub mod summary;

pub use data::{MISSING_FLOAT, MISSING_INT, ProfileDataHandler, ProfileValue, T0C};
pub use error::{ProfileError, Result};
pub use names::{ValueKind, value_kind};
pub use options::{DEFAULT_STANDARD_LEVELS, QcOptions, StandardLevel};
pub use summary::{ProfileQcSummary, ReferenceMismatch};
