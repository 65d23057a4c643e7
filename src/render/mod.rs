//! HTML rendering of the infographic page.
//!
//! The template lives in `templates/index.html` and is compiled into the
//! binary by askama. Chart data is injected as a JSON object (`chartData`)
//! that `static/js/app.js` reads on page load.

use askama::Template;

use crate::archive::footer_sentence;
use crate::domain::{IndicatorBundle, KpiSnapshot};
use crate::error::AppError;

/// Link to an archived month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLink {
    pub href: String,
    pub label: String,
}

impl ArchiveLink {
    pub fn from_file_name(name: &str) -> Self {
        Self {
            href: name.to_string(),
            label: name.trim_end_matches(".html").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    title: &'a str,
    chart_json: String,
    kpi: &'a KpiSnapshot,
    footer: String,
    archives: Vec<ArchiveLink>,
}

/// Render the full page.
///
/// `timestamp` is shown in the footer and must follow
/// [`crate::archive::FOOTER_TIMESTAMP_FORMAT`] so later builds can read it back.
pub fn render_page(
    title: &str,
    bundle: &IndicatorBundle,
    timestamp: &str,
    archives: &[String],
) -> Result<String, AppError> {
    let page = IndexPage {
        title,
        chart_json: chart_json(bundle)?,
        kpi: &bundle.kpi_data,
        footer: footer_sentence(timestamp),
        archives: archives.iter().map(|n| ArchiveLink::from_file_name(n)).collect(),
    };
    page.render()
        .map_err(|e| AppError::output(format!("Failed to render page template: {e}")))
}

/// Bundle as JSON safe to embed in a `<script>` element.
fn chart_json(bundle: &IndicatorBundle) -> Result<String, AppError> {
    let json = serde_json::to_string(bundle)
        .map_err(|e| AppError::output(format!("Failed to encode chart data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}
