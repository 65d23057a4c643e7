//! FRED API integration.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::data::SeriesSource;
use crate::domain::Observation;
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const OBS_LIMIT: usize = 100000;
// Enough rows to skip a few trailing "." placeholders in a fresh release.
const LATEST_LIMIT: usize = 10;

pub const SERIES_M2: &str = "M2SL";
pub const SERIES_TEN_YEAR: &str = "DGS10";
pub const SERIES_THREE_MONTH: &str = "DTB3";
pub const SERIES_FED_FUNDS: &str = "FEDFUNDS";
pub const SERIES_HIGH_YIELD: &str = "BAMLH0A0HYM2EY";
pub const SERIES_GDP_GROWTH: &str = "A191RL1Q225SBEA";
pub const SERIES_INFLATION: &str = "DPCCRV1Q225SBEA";

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    fn request(&self, series_id: &str, sort_order: &str, limit: usize) -> RequestBuilder {
        self.client.get(BASE_URL).query(&[
            ("series_id", series_id),
            ("api_key", &self.api_key),
            ("file_type", "json"),
            ("sort_order", sort_order),
            ("limit", &limit.to_string()),
        ])
    }

    fn send(&self, series_id: &str, req: RequestBuilder) -> Result<Vec<Observation>, AppError> {
        let resp = req
            .send()
            .map_err(|e| AppError::fetch(format!("FRED request for {series_id} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "FRED request for {series_id} failed with status {}.",
                resp.status()
            )));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| AppError::fetch(format!("Failed to parse FRED response for {series_id}: {e}")))?;

        debug!(series_id, n = body.observations.len(), "FRED observations received");
        parse_observations(body.observations)
    }
}

impl SeriesSource for FredClient {
    fn observations(&self, series_id: &str, start: Option<NaiveDate>) -> Result<Vec<Observation>, AppError> {
        let mut req = self.request(series_id, "asc", OBS_LIMIT);
        if let Some(date) = start {
            req = req.query(&[("observation_start", &date.format("%Y-%m-%d").to_string())]);
        }
        self.send(series_id, req)
    }

    fn latest_value(&self, series_id: &str) -> Result<Option<(NaiveDate, f64)>, AppError> {
        let req = self.request(series_id, "desc", LATEST_LIMIT);
        let obs = self.send(series_id, req)?;
        // Descending order: the first present value is the latest.
        Ok(obs.into_iter().find_map(|(date, value)| value.map(|v| (date, v))))
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

fn parse_observations(raw: Vec<RawObservation>) -> Result<Vec<Observation>, AppError> {
    raw.into_iter()
        .map(|obs| {
            let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
                .map_err(|e| AppError::fetch(format!("Invalid FRED date '{}': {e}", obs.date)))?;
            Ok((date, parse_value(&obs.value)))
        })
        .collect()
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
