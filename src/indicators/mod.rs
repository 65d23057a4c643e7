//! Indicator fetching and aggregation.
//!
//! - reshaping helpers (`format`)
//! - per-indicator fetchers (`fetch`)
//! - `collect_all`, which builds the full page dataset or fails as a whole

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::data::SeriesSource;
use crate::domain::IndicatorBundle;
use crate::error::AppError;

pub mod fetch;
pub mod format;

pub use fetch::*;
pub use format::*;

/// First date of the chart window: `years` years of 365 days before `today`.
pub fn lookback_start(today: NaiveDate, years: u32) -> NaiveDate {
    today - Duration::days(365 * i64::from(years))
}

/// Fetch every indicator on the page.
///
/// `source` is `None` when no API credential was configured; that fails before
/// any request is made. The first fetcher error aborts the whole collection.
pub fn collect_all<S: SeriesSource>(source: Option<&S>, start: NaiveDate) -> Result<IndicatorBundle, AppError> {
    let source = source.ok_or_else(|| {
        AppError::config("FRED client is not configured. Check the FRED_API_KEY environment variable.")
    })?;

    let bundle = IndicatorBundle {
        kpi_data: kpi_snapshot(source)?,
        m2_liquidity: money_supply(source, start)?,
        treasury_spread: treasury_spread(source, start)?,
        fed_funds_vs_10y: fed_funds_vs_ten_year(source, start)?,
        high_yield_index: high_yield_index(source, start)?,
    };

    info!(
        m2 = bundle.m2_liquidity.len(),
        spread = bundle.treasury_spread.len(),
        fed_funds_vs_10y = bundle.fed_funds_vs_10y.labels.len(),
        high_yield = bundle.high_yield_index.len(),
        "indicators collected"
    );
    Ok(bundle)
}
