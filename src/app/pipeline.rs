//! The site build: archive check -> data -> render -> write -> assets.
//!
//! Nothing in the output directory changes until the data has been fetched and
//! the page rendered; the archive rename and the page swap happen together at
//! the end.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::archive::{
    ArchivePlan, BuildState, FOOTER_TIMESTAMP_FORMAT, OUTPUT_FILE_NAME, apply_archive, list_archives, plan_archive,
    remove_state, sort_newest_first, write_state,
};
use crate::config::Config;
use crate::data::SeriesSource;
use crate::domain::YearMonth;
use crate::error::AppError;
use crate::indicators::{collect_all, lookback_start};
use crate::io::{StagedPage, copy_static_assets};
use crate::render::render_page;

/// What a successful build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub page: PathBuf,
    pub archived: Option<PathBuf>,
    pub archives: Vec<String>,
    pub assets_copied: usize,
}

/// Build the site into `config.output_dir` as of `now`.
///
/// `source` is `None` when no FRED credential is configured.
pub fn build_site<S: SeriesSource>(
    config: &Config,
    source: Option<&S>,
    now: DateTime<Local>,
) -> Result<BuildReport, AppError> {
    info!("Iniciando la construcción del sitio estático...");
    let today = now.date_naive();
    let output_dir = &config.output_dir;

    // 1) Archive check (best effort).
    let plan = plan_archive(output_dir, today).unwrap_or_else(|err| {
        warn!("Archive check failed: {err}. Continuing without archiving.");
        ArchivePlan::Skip
    });

    // 2) Data.
    let start = lookback_start(today, config.years);
    let bundle = collect_all(source, start).inspect_err(|err| {
        error!("Error al obtener los datos: {err}. El sitio no se ha generado.");
    })?;

    // 3) Render with the archive list as it will look after this build.
    let existing = list_archives(output_dir).unwrap_or_else(|err| {
        warn!("Failed to list archives: {err}");
        Vec::new()
    });
    let timestamp = now.format(FOOTER_TIMESTAMP_FORMAT).to_string();
    let planned = plan.archive_name();
    let mut archives = navigation(&existing, planned.clone());
    let html = render_page(&config.title, &bundle, &timestamp, &archives)?;

    // 4) Stage the page, 5) copy assets.
    let mut staged = StagedPage::write(output_dir, &html)?;
    let assets_copied = copy_static_assets(&config.static_dir, &output_dir.join("static"))?;

    // 6) Commit.
    let archived = apply_archive(&plan).unwrap_or_else(|err| {
        warn!("{err}");
        None
    });
    let landed = linked_archive(archived.as_deref(), planned.as_deref());
    if landed != planned {
        // The archive did not end up where the page links to it.
        archives = navigation(&existing, landed);
        let html = render_page(&config.title, &bundle, &timestamp, &archives)?;
        staged = StagedPage::write(output_dir, &html)?;
    }

    // The sidecar describes the page being replaced; drop it before the swap.
    if let Err(err) = remove_state(output_dir) {
        warn!("{err}");
    }
    let page = staged.commit(&output_dir.join(OUTPUT_FILE_NAME))?;

    let state = BuildState {
        month: YearMonth::of(&today),
        generated_at: now.fixed_offset(),
    };
    if let Err(err) = write_state(output_dir, &state) {
        warn!("{err}");
    }

    info!("¡Sitio generado con éxito en la carpeta '{}'!", output_dir.display());
    Ok(BuildReport {
        page,
        archived,
        archives,
        assets_copied,
    })
}

/// Archive names linked from the page: `existing` plus `new`, newest first.
fn navigation(existing: &[String], new: Option<String>) -> Vec<String> {
    let mut names = existing.to_vec();
    names.extend(new);
    sort_newest_first(&mut names);
    names
}

/// The planned archive name, if the previous page really ended up there.
fn linked_archive(archived: Option<&Path>, planned: Option<&str>) -> Option<String> {
    let name = archived?.file_name()?.to_str()?;
    (Some(name) == planned).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_merges_and_sorts() {
        let existing = vec!["2025-03.html".to_string(), "2024-12.html".to_string()];
        assert_eq!(
            navigation(&existing, Some("2025-05.html".to_string())),
            vec!["2025-05.html", "2025-03.html", "2024-12.html"]
        );
        assert_eq!(navigation(&existing, Some("2025-03.html".to_string())), existing);
    }

    #[test]
    fn failed_or_diverted_archive_is_not_linked() {
        let planned = Some("2025-05.html");
        assert_eq!(
            linked_archive(Some(Path::new("dist/2025-05.html")), planned),
            Some("2025-05.html".to_string())
        );
        assert_eq!(linked_archive(None, planned), None);
        assert_eq!(linked_archive(Some(Path::new("dist/2025-05.1.html")), planned), None);
        assert_eq!(linked_archive(None, None), None);
    }
}
