//! Staged writing of the generated page.
//!
//! The page is written to a temporary file inside the output directory and
//! only renamed over `index.html` once the rest of the build has succeeded.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::AppError;

/// A rendered page waiting to be moved into place.
pub struct StagedPage {
    file: NamedTempFile,
}

impl StagedPage {
    /// Write `html` to a temporary file in `output_dir`, creating the directory
    /// if needed.
    pub fn write(output_dir: &Path, html: &str) -> Result<Self, AppError> {
        fs::create_dir_all(output_dir)
            .map_err(|e| AppError::output(format!("Failed to create '{}': {e}", output_dir.display())))?;

        let mut file = NamedTempFile::new_in(output_dir)
            .map_err(|e| AppError::output(format!("Failed to create staging file: {e}")))?;
        file.write_all(html.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| AppError::output(format!("Failed to write staging file: {e}")))?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Atomically replace `target` with the staged page.
    pub fn commit(self, target: &Path) -> Result<PathBuf, AppError> {
        self.file
            .persist(target)
            .map_err(|e| AppError::output(format!("Failed to move page into '{}': {}", target.display(), e.error)))?;
        Ok(target.to_path_buf())
    }
}
