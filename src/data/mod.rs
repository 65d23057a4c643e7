//! Upstream time-series data.
//!
//! Indicator code talks to [`SeriesSource`] rather than to FRED directly so the
//! reshaping logic can be exercised with in-memory series.

use chrono::NaiveDate;

use crate::domain::Observation;
use crate::error::AppError;

pub mod fred;

pub use fred::FredClient;

/// A provider of named economic time series.
pub trait SeriesSource {
    /// Observations for `series_id` in ascending date order, starting at
    /// `start` (inclusive) when given.
    fn observations(&self, series_id: &str, start: Option<NaiveDate>) -> Result<Vec<Observation>, AppError>;

    /// Most recent non-missing observation of the latest release.
    fn latest_value(&self, series_id: &str) -> Result<Option<(NaiveDate, f64)>, AppError> {
        let obs = self.observations(series_id, None)?;
        Ok(obs
            .into_iter()
            .rev()
            .find_map(|(date, value)| value.map(|v| (date, v))))
    }
}
