//! Loading of profiles and QC options from files.

pub mod error;
pub mod options_file;
pub mod profile_csv;

pub use error::{IngestError, Result};
pub use options_file::load_options;
pub use profile_csv::{PROFILE_ID_COLUMN, ProfileRecord, REFERENCE_PREFIX, read_profiles};
