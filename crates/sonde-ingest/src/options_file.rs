use std::path::Path;

use sonde_model::QcOptions;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Load and validate QC options from a TOML file.
///
/// Keys left out of the file keep their defaults.
pub fn load_options(path: &Path) -> Result<QcOptions> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options: QcOptions = toml::from_str(&text).map_err(|source| IngestError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    options
        .validate()
        .map_err(|source| IngestError::InvalidOptions {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        checks = ?options.checks,
        standard_levels = options.standard_levels.len(),
        "loaded options"
    );
    Ok(options)
}
