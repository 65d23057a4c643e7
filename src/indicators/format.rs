//! Reshaping raw observations into chart payloads.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DualSeriesPayload, Observation, TimeSeriesPayload, YearMonth};

const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn label(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

/// Convert a series into parallel label/value arrays.
///
/// Points before `start` are dropped, then missing values, then the rest are
/// rounded. Input order is preserved.
pub fn format_series(series: &[Observation], start: Option<NaiveDate>) -> TimeSeriesPayload {
    let mut labels = Vec::with_capacity(series.len());
    let mut data = Vec::with_capacity(series.len());

    for &(date, value) in series {
        if start.is_some_and(|s| date < s) {
            continue;
        }
        let Some(v) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        labels.push(label(date));
        data.push(round2(v));
    }

    TimeSeriesPayload { labels, data }
}

/// Pointwise `long - short` on matching dates.
///
/// Every date of either input appears in the output; a date missing from one
/// side, or missing a value on either side, produces a missing point.
pub fn subtract(long: &[Observation], short: &[Observation]) -> Vec<Observation> {
    let mut joined: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for &(date, value) in long {
        joined.entry(date).or_default().0 = value;
    }
    for &(date, value) in short {
        joined.entry(date).or_default().1 = value;
    }

    joined
        .into_iter()
        .map(|(date, pair)| match pair {
            (Some(a), Some(b)) => (date, Some(a - b)),
            _ => (date, None),
        })
        .collect()
}

/// Month-start averages of the present values.
pub fn resample_monthly_mean(series: &[Observation]) -> BTreeMap<YearMonth, f64> {
    let mut buckets: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for &(date, value) in series {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        let slot = buckets.entry(YearMonth::of(&date)).or_insert((0.0, 0));
        slot.0 += v;
        slot.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(month, (sum, n))| (month, sum / n as f64))
        .collect()
}

/// Monthly fed funds vs 10-year payload, restricted to months present in both.
pub fn format_monthly_pair(fed_funds: &[Observation], ten_year: &[Observation]) -> DualSeriesPayload {
    let left = resample_monthly_mean(fed_funds);
    let right = resample_monthly_mean(ten_year);

    let mut out = DualSeriesPayload {
        labels: Vec::new(),
        fed_funds: Vec::new(),
        ten_year: Vec::new(),
    };
    for (month, a) in &left {
        if let Some(b) = right.get(month) {
            out.labels.push(label(month.first_day()));
            out.fed_funds.push(round2(*a));
            out.ten_year.push(round2(*b));
        }
    }
    out
}
