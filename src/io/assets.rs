//! Copying the static asset tree into the output directory.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::AppError;

/// Recursively copy `src` into `dest`, overwriting existing files.
///
/// Symlinks are followed, so a linked directory is copied as a real one.
/// Returns the number of files copied; a missing `src` copies nothing.
pub fn copy_static_assets(src: &Path, dest: &Path) -> Result<usize, AppError> {
    if !src.is_dir() {
        info!("No static directory at '{}'; skipping asset copy.", src.display());
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| AppError::output(format!("Failed to walk '{}': {e}", src.display())))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| AppError::output(format!("Unexpected path '{}': {e}", entry.path().display())))?;
        let to = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&to)
                .map_err(|e| AppError::output(format!("Failed to create '{}': {e}", to.display())))?;
            continue;
        }

        fs::copy(entry.path(), &to).map_err(|e| {
            AppError::output(format!(
                "Failed to copy '{}' to '{}': {e}",
                entry.path().display(),
                to.display()
            ))
        })?;
        debug!("copied {}", to.display());
        copied += 1;
    }

    info!(copied, "Copied static assets to '{}'.", dest.display());
    Ok(copied)
}
