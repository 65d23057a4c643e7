//! Domain types used throughout the build.
//!
//! This module defines:
//!
//! - chart payloads (`TimeSeriesPayload`, `DualSeriesPayload`, `KpiSnapshot`)
//! - the full page dataset (`IndicatorBundle`)
//! - calendar months used for archiving (`YearMonth`)

pub mod types;

pub use types::*;
