//! Month-based archiving of previous output.
//!
//! Before a build, the existing `index.html` is inspected to find the month it
//! was generated in. If that month is not the current one, the page is moved
//! to `<YYYY-MM>.html` so the new build does not overwrite it. Existing archive
//! entries are never overwritten.
//!
//! The month comes from, in order:
//!
//! - the build-state sidecar (`state`), when its timestamp matches the footer
//! - the footer sentence in the page itself (`footer`)
//! - the file's last-modified time

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use tracing::{info, warn};

use crate::domain::YearMonth;
use crate::error::AppError;

pub mod footer;
pub mod state;

pub use footer::*;
pub use state::*;

pub const OUTPUT_FILE_NAME: &str = "index.html";

const ARCHIVE_PATTERN: &str = r"^\d{4}-\d{2}\.html$";

/// Where the generation month of the existing page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSource {
    StateFile,
    Footer,
    ModifiedTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchivePlan {
    /// Nothing to move: no previous page, or it belongs to the current month.
    Skip,
    Archive {
        from: PathBuf,
        to: PathBuf,
        month: YearMonth,
        source: MonthSource,
    },
}

impl ArchivePlan {
    /// File name of the archive entry this plan creates.
    pub fn archive_name(&self) -> Option<String> {
        match self {
            ArchivePlan::Skip => None,
            ArchivePlan::Archive { month, .. } => Some(month.archive_file_name()),
        }
    }
}

/// Decide whether the page in `output_dir` must be archived before a build
/// happening on `today`.
pub fn plan_archive(output_dir: &Path, today: NaiveDate) -> Result<ArchivePlan, AppError> {
    let page = output_dir.join(OUTPUT_FILE_NAME);
    if !page.exists() {
        info!("No previous {} to archive.", page.display());
        return Ok(ArchivePlan::Skip);
    }

    let Some((month, source)) = generated_month(output_dir, &page)? else {
        return Ok(ArchivePlan::Skip);
    };

    if month == YearMonth::of(&today) {
        info!(%month, "Existing page is from the current month; it will be overwritten.");
        return Ok(ArchivePlan::Skip);
    }

    Ok(ArchivePlan::Archive {
        from: page,
        to: output_dir.join(month.archive_file_name()),
        month,
        source,
    })
}

/// Month the existing page was generated in. `None` if the page vanished.
fn generated_month(output_dir: &Path, page: &Path) -> Result<Option<(YearMonth, MonthSource)>, AppError> {
    let footer = match fs::read(page) {
        Ok(bytes) => parse_footer_timestamp(&String::from_utf8_lossy(&bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            warn!("Failed to read '{}': {e}", page.display());
            None
        }
    };

    match read_state(output_dir) {
        Ok(Some(state)) if state.describes(footer) => {
            return Ok(Some((state.month, MonthSource::StateFile)));
        }
        Ok(Some(state)) => warn!(
            month = %state.month,
            "Build state does not match '{}'; ignoring it.",
            page.display()
        ),
        Ok(None) => {}
        Err(err) => warn!("{err}; falling back to the page footer."),
    }

    if let Some(ts) = footer {
        return Ok(Some((YearMonth::of(&ts), MonthSource::Footer)));
    }

    warn!(
        "No generation date found in '{}'; using its modification time.",
        page.display()
    );
    let modified = match fs::metadata(page).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::output(format!(
                "Failed to read modification time of '{}': {e}",
                page.display()
            )));
        }
    };
    let local: DateTime<Local> = modified.into();
    Ok(Some((YearMonth::of(&local), MonthSource::ModifiedTime)))
}

/// Carry out a plan. Returns the archive path when a file was moved.
///
/// An existing archive entry is never replaced: the page then goes to
/// `<YYYY-MM>.<n>.html`, which is kept on disk but not linked from the page.
pub fn apply_archive(plan: &ArchivePlan) -> Result<Option<PathBuf>, AppError> {
    let ArchivePlan::Archive { from, to, month, source } = plan else {
        return Ok(None);
    };

    let target = if to.exists() {
        let fallback = free_duplicate_path(to, *month);
        warn!(
            "Archive '{}' already exists; keeping it and saving the previous page as '{}'.",
            to.display(),
            fallback.display()
        );
        fallback
    } else {
        to.clone()
    };

    match fs::rename(from, &target) {
        Ok(()) => {
            info!(%month, ?source, "Archived previous page as '{}'.", target.display());
            Ok(Some(target))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::output(format!(
            "Failed to archive '{}' as '{}': {e}",
            from.display(),
            target.display()
        ))),
    }
}

fn free_duplicate_path(archive: &Path, month: YearMonth) -> PathBuf {
    let dir = archive.parent().unwrap_or_else(|| Path::new("."));
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{month}.{n}.html"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Archive file names (`YYYY-MM.html`) in `output_dir`, most recent first.
pub fn list_archives(output_dir: &Path) -> Result<Vec<String>, AppError> {
    let re = Regex::new(ARCHIVE_PATTERN).map_err(|e| AppError::output(format!("Invalid archive pattern: {e}")))?;

    let entries = match fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(AppError::output(format!(
                "Failed to list '{}': {e}",
                output_dir.display()
            )));
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::output(format!("Failed to list '{}': {e}", output_dir.display())))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if re.is_match(name) {
                names.push(name.to_string());
            }
        }
    }

    sort_newest_first(&mut names);
    Ok(names)
}

/// `YYYY-MM.html` names sort lexicographically in month order.
pub fn sort_newest_first(names: &mut Vec<String>) {
    names.sort_unstable_by(|a, b| b.cmp(a));
    names.dedup();
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_page_means_skip() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(plan_archive(dir.path(), day(2025, 6, 1)).unwrap(), ArchivePlan::Skip);
    }

    #[test]
    fn missing_output_dir_means_skip() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("dist");
        assert_eq!(plan_archive(&missing, day(2025, 6, 1)).unwrap(), ArchivePlan::Skip);
        assert!(list_archives(&missing).unwrap().is_empty());
    }

    #[test]
    fn footer_from_previous_month_plans_archive() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join(OUTPUT_FILE_NAME);
        fs::write(&page, footer_sentence("2025-05-31 23:59 UTC")).unwrap();

        let plan = plan_archive(dir.path(), day(2025, 6, 1)).unwrap();
        assert_eq!(
            plan,
            ArchivePlan::Archive {
                from: page,
                to: dir.path().join("2025-05.html"),
                month: YearMonth::new(2025, 5).unwrap(),
                source: MonthSource::Footer,
            }
        );
        assert_eq!(plan.archive_name().as_deref(), Some("2025-05.html"));
    }

    #[test]
    fn same_month_footer_means_skip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OUTPUT_FILE_NAME), footer_sentence("2025-06-01 00:05 UTC")).unwrap();
        assert_eq!(plan_archive(dir.path(), day(2025, 6, 30)).unwrap(), ArchivePlan::Skip);
    }

    #[test]
    fn missing_footer_falls_back_to_modified_time() {
        use chrono::TimeZone;
        use std::time::SystemTime;

        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join(OUTPUT_FILE_NAME);
        fs::write(&page, "<html><footer>sin fecha</footer></html>").unwrap();

        let mtime: SystemTime = Local.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).single().unwrap().into();
        fs::File::options()
            .write(true)
            .open(&page)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let plan = tracing::subscriber::with_default(subscriber, || plan_archive(dir.path(), day(2025, 6, 1))).unwrap();

        let output = logs.contents();
        assert!(output.contains("WARN"), "no warning in: {output}");
        assert!(output.contains("using its modification time"));
        assert_eq!(
            plan,
            ArchivePlan::Archive {
                from: page,
                to: dir.path().join("2024-03.html"),
                month: YearMonth::new(2024, 3).unwrap(),
                source: MonthSource::ModifiedTime,
            }
        );
    }

    #[test]
    fn matching_build_state_is_used() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OUTPUT_FILE_NAME), footer_sentence("2025-05-31 23:59 +02:00")).unwrap();
        let state = BuildState {
            month: YearMonth::new(2025, 5).unwrap(),
            generated_at: chrono::DateTime::parse_from_rfc3339("2025-05-31T23:59:10+02:00").unwrap(),
        };
        write_state(dir.path(), &state).unwrap();

        match plan_archive(dir.path(), day(2025, 6, 1)).unwrap() {
            ArchivePlan::Archive { month, source, .. } => {
                assert_eq!(month, YearMonth::new(2025, 5).unwrap());
                assert_eq!(source, MonthSource::StateFile);
            }
            ArchivePlan::Skip => panic!("expected an archive plan"),
        }
    }

    #[test]
    fn stale_build_state_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OUTPUT_FILE_NAME), footer_sentence("2025-06-01 09:00 UTC")).unwrap();
        let stale = BuildState {
            month: YearMonth::new(2025, 5).unwrap(),
            generated_at: chrono::DateTime::parse_from_rfc3339("2025-05-20T10:00:00+00:00").unwrap(),
        };
        write_state(dir.path(), &stale).unwrap();

        // The footer says June, so a June rebuild leaves the page alone.
        assert_eq!(plan_archive(dir.path(), day(2025, 6, 20)).unwrap(), ArchivePlan::Skip);
    }

    #[test]
    fn corrupt_state_falls_back_to_footer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(OUTPUT_FILE_NAME), footer_sentence("2025-05-31 23:59 UTC")).unwrap();
        fs::write(state_path(dir.path()), "garbage").unwrap();

        match plan_archive(dir.path(), day(2025, 6, 1)).unwrap() {
            ArchivePlan::Archive { source, .. } => assert_eq!(source, MonthSource::Footer),
            ArchivePlan::Skip => panic!("expected an archive plan"),
        }
    }

    #[test]
    fn apply_moves_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join(OUTPUT_FILE_NAME);
        fs::write(&page, footer_sentence("2025-04-10 10:00 UTC")).unwrap();

        let plan = plan_archive(dir.path(), day(2025, 6, 1)).unwrap();
        let moved = apply_archive(&plan).unwrap();
        assert_eq!(moved, Some(dir.path().join("2025-04.html")));
        assert!(!page.exists());
        assert!(dir.path().join("2025-04.html").exists());

        assert_eq!(apply_archive(&ArchivePlan::Skip).unwrap(), None);
    }

    #[test]
    fn existing_archive_entry_is_never_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join(OUTPUT_FILE_NAME);
        fs::write(&page, footer_sentence("2025-05-28 10:00 UTC")).unwrap();
        fs::write(dir.path().join("2025-05.html"), "may report").unwrap();

        let plan = plan_archive(dir.path(), day(2025, 6, 1)).unwrap();
        let moved = apply_archive(&plan).unwrap();

        assert_eq!(moved, Some(dir.path().join("2025-05.1.html")));
        assert_eq!(fs::read_to_string(dir.path().join("2025-05.html")).unwrap(), "may report");
        assert!(!page.exists());
        // The duplicate is kept but not offered as a navigation entry.
        assert_eq!(list_archives(dir.path()).unwrap(), vec!["2025-05.html"]);
    }

    #[test]
    fn listing_filters_and_sorts_descending() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "2024-11.html",
            "2025-02.html",
            "2024-12.html",
            "index.html",
            "2025-1.html",
            "2025-02.html.bak",
            "x2025-03.html",
            "2025-03.htm",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("2023-01.html")).unwrap();

        assert_eq!(
            list_archives(dir.path()).unwrap(),
            vec!["2025-02.html", "2024-12.html", "2024-11.html"]
        );
    }
}
