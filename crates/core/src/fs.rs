//! Filesystem utilities

use std::path::Path;

use log::{error, info};

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check if a path is a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Ensure a dataset file is present before anything tries to open it
///
/// Logs the outcome so a missing database shows up at startup rather than on
/// the first request.
pub fn require_file(path: &str) -> anyhow::Result<()> {
    if is_file(path) {
        info!("Found dataset: {}", path);
        return Ok(());
    }

    if path_exists(path) {
        error!("Dataset path is not a file: {}", path);
        anyhow::bail!("dataset path is not a file: {}", path);
    }

    error!("Dataset not found: {}", path);
    anyhow::bail!("dataset not found: {}", path)
}
