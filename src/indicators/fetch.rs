//! One fetcher per indicator on the page.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::data::SeriesSource;
use crate::data::fred::{
    SERIES_FED_FUNDS, SERIES_GDP_GROWTH, SERIES_HIGH_YIELD, SERIES_INFLATION, SERIES_M2, SERIES_TEN_YEAR,
    SERIES_THREE_MONTH,
};
use crate::domain::{DualSeriesPayload, KpiSnapshot, KpiValue, TimeSeriesPayload};
use crate::error::AppError;
use crate::indicators::format::{format_monthly_pair, format_series, subtract};

/// Headline figures from the latest release of each KPI series.
pub fn kpi_snapshot<S: SeriesSource>(source: &S) -> Result<KpiSnapshot, AppError> {
    info!("Obteniendo datos de KPIs...");

    let (gdp_date, gdp) = latest(source, SERIES_GDP_GROWTH)?;
    let (inflation_date, inflation) = latest(source, SERIES_INFLATION)?;
    let (rate_date, rate) = latest(source, SERIES_FED_FUNDS)?;

    Ok(KpiSnapshot {
        gdp_growth: KpiValue {
            value: format!("{gdp:.1}%"),
            note: format!("Crecimiento trimestral {}.", quarter_label(gdp_date)),
        },
        inflation_rate: KpiValue {
            value: format!("{inflation:.1}%"),
            note: format!("Variación interanual (PCE) {}.", quarter_label(inflation_date)),
        },
        interest_rate: KpiValue {
            value: format!("{rate:.2}%"),
            note: format!(
                "Tasa efectiva de Fondos Federales (Fed Funds) {}.",
                quarter_label(rate_date)
            ),
        },
    })
}

/// M2 money stock.
pub fn money_supply<S: SeriesSource>(source: &S, start: NaiveDate) -> Result<TimeSeriesPayload, AppError> {
    info!("Obteniendo datos de M2 desde {start}...");
    let m2 = source.observations(SERIES_M2, Some(start))?;
    Ok(format_series(&m2, Some(start)))
}

/// 10-year minus 3-month treasury yield.
pub fn treasury_spread<S: SeriesSource>(source: &S, start: NaiveDate) -> Result<TimeSeriesPayload, AppError> {
    info!("Obteniendo datos del Spread del Tesoro desde {start}...");
    let ten_year = source.observations(SERIES_TEN_YEAR, Some(start))?;
    let three_month = source.observations(SERIES_THREE_MONTH, Some(start))?;
    Ok(format_series(&subtract(&ten_year, &three_month), Some(start)))
}

/// Monthly fed funds rate against the 10-year yield.
pub fn fed_funds_vs_ten_year<S: SeriesSource>(source: &S, start: NaiveDate) -> Result<DualSeriesPayload, AppError> {
    info!("Obteniendo datos de Fed Funds vs 10-Year desde {start}...");
    let fed_funds = source.observations(SERIES_FED_FUNDS, Some(start))?;
    let ten_year = source.observations(SERIES_TEN_YEAR, Some(start))?;
    Ok(format_monthly_pair(&fed_funds, &ten_year))
}

/// ICE BofA US High Yield Index effective yield.
pub fn high_yield_index<S: SeriesSource>(source: &S, start: NaiveDate) -> Result<TimeSeriesPayload, AppError> {
    info!("Obteniendo datos del Índice High-Yield desde {start}...");
    let high_yield = source.observations(SERIES_HIGH_YIELD, Some(start))?;
    Ok(format_series(&high_yield, Some(start)))
}

fn latest<S: SeriesSource>(source: &S, series_id: &str) -> Result<(NaiveDate, f64), AppError> {
    source
        .latest_value(series_id)?
        .ok_or_else(|| AppError::fetch(format!("No released values for series {series_id}.")))
}

/// `Q3 2025` style label for the quarter containing `date`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{} {}", (date.month() - 1) / 3 + 1, date.year())
}
