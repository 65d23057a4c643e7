//! Build-state sidecar stored next to `index.html`.
//!
//! The sidecar is removed before a new page is moved into place and written
//! again afterwards, and it is only trusted while its timestamp matches the
//! footer of the page it sits next to.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::YearMonth;
use crate::error::AppError;

pub const STATE_FILE_NAME: &str = ".build-state.json";

/// Month and time of the last successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub month: YearMonth,
    pub generated_at: DateTime<FixedOffset>,
}

impl BuildState {
    /// Whether this record belongs to a page whose footer reads `footer`.
    pub fn describes(&self, footer: Option<NaiveDateTime>) -> bool {
        let generated = self.generated_at.naive_local();
        footer.is_some_and(|ts| {
            ts.date() == generated.date() && ts.hour() == generated.hour() && ts.minute() == generated.minute()
        })
    }
}

pub fn state_path(output_dir: &Path) -> PathBuf {
    output_dir.join(STATE_FILE_NAME)
}

/// Read the sidecar; `Ok(None)` when it does not exist.
pub fn read_state(output_dir: &Path) -> Result<Option<BuildState>, AppError> {
    let path = state_path(output_dir);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::output(format!("Failed to read '{}': {e}", path.display())));
        }
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| AppError::output(format!("Invalid build state '{}': {e}", path.display())))
}

pub fn write_state(output_dir: &Path, state: &BuildState) -> Result<(), AppError> {
    let path = state_path(output_dir);
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| AppError::output(format!("Failed to encode build state: {e}")))?;
    fs::write(&path, json).map_err(|e| AppError::output(format!("Failed to write '{}': {e}", path.display())))
}

/// Delete the sidecar; a missing file is fine.
pub fn remove_state(output_dir: &Path) -> Result<(), AppError> {
    let path = state_path(output_dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::output(format!("Failed to remove '{}': {e}", path.display()))),
    }
}
