//! Shared domain types.
//!
//! Payload types serialize straight into the `chartData` object the page's
//! JavaScript reads, so field names here are part of the page contract.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One FRED observation. `None` marks a value FRED reported as missing (`"."`).
pub type Observation = (NaiveDate, Option<f64>);

/// Parallel label/value arrays for a single-line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPayload {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl TimeSeriesPayload {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Policy rate against the long rate, one label per month start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualSeriesPayload {
    pub labels: Vec<String>,
    pub fed_funds: Vec<f64>,
    pub ten_year: Vec<f64>,
}

/// A single headline figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiValue {
    pub value: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub gdp_growth: KpiValue,
    pub inflation_rate: KpiValue,
    pub interest_rate: KpiValue,
}

/// Everything the page renders, keyed the way `static/js/app.js` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    pub kpi_data: KpiSnapshot,
    pub m2_liquidity: TimeSeriesPayload,
    pub treasury_spread: TimeSeriesPayload,
    pub fed_funds_vs_10y: DualSeriesPayload,
    pub high_yield_index: TimeSeriesPayload,
}

/// Calendar month, displayed and parsed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        // `month` is validated on construction, so day 1 always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Name of the archive file for a report generated in this month.
    pub fn archive_file_name(self) -> String {
        format!("{self}.html")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(format!("expected YYYY-MM, got '{s}'"));
        }
        let year: i32 = year.parse().map_err(|_| format!("invalid year in '{s}'"))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid month in '{s}'"))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in '{s}'"))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
