//! The generation footer embedded in every page.
//!
//! Output built before the build-state sidecar existed only records its month
//! in this sentence, so it is still parsed as a fallback.

use chrono::NaiveDateTime;
use regex::Regex;

use crate::domain::YearMonth;

/// Timestamp format used inside the footer.
///
/// chrono has no zone names for the local time zone, so `%Z` renders the
/// numeric offset (`2025-06-01 09:00 +02:00`). Pages with a zone abbreviation
/// (`CEST`, `UTC`) parse the same way: the zone token is ignored.
pub const FOOTER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

const FOOTER_PATTERN: &str =
    r"Datos actualizados a fecha\s+(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2})(?:\s+[^\s.]+)?\.\s*Generado estáticamente\.";

/// The footer sentence for a page generated at `timestamp`.
pub fn footer_sentence(timestamp: &str) -> String {
    format!("Datos actualizados a fecha {timestamp}. Generado estáticamente.")
}

/// Date and time recovered from a page footer, if present and valid.
pub fn parse_footer_timestamp(html: &str) -> Option<NaiveDateTime> {
    let re = Regex::new(FOOTER_PATTERN).ok()?;
    let caps = re.captures(html)?;
    let raw = format!("{} {}", &caps[1], &caps[2]);
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M").ok()
}

/// Month a page was generated in, according to its footer.
pub fn parse_footer_month(html: &str) -> Option<YearMonth> {
    parse_footer_timestamp(html).map(|ts| YearMonth::of(&ts))
}
