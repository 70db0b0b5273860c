//! Location and sanity checks for Swiss Ephemeris data files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ephemeris::types::EphemerisError;

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Data files covering 1800-2400 CE
pub const REQUIRED_FILES: &[&str] = &[
    "sepl_00.se1",
    "sepl_06.se1",
    "sepl_12.se1",
    "sepl_18.se1",
    "sepl_24.se1",
];

/// Explicit path first, then the environment value, then the system default.
pub fn resolve_ephemeris_path(explicit: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    explicit
        .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
}

/// The directory must exist and hold every required file, none of them empty.
pub fn validate_ephemeris_dir(dir: &Path) -> Result<(), EphemerisError> {
    if !dir.exists() {
        return Err(EphemerisError::FileNotFound {
            path: dir.display().to_string(),
            message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
        });
    }
    if let Some(missing) = missing_data_file(dir) {
        return Err(EphemerisError::FileNotFound {
            path: missing.display().to_string(),
            message: "Required ephemeris data file is missing or empty.".to_string(),
        });
    }
    Ok(())
}

fn missing_data_file(dir: &Path) -> Option<PathBuf> {
    REQUIRED_FILES.iter().map(|name| dir.join(name)).find(|file| {
        fs::metadata(file)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true)
    })
}
