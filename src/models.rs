// src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First element of every World Bank v2 response pair: paging info plus the
/// date the indicator was last refreshed upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldBankMeta {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u32,
    #[serde(default)]
    pub sourceid: Option<String>,
    pub lastupdated: String,
}

impl WorldBankMeta {
    /// Parses `lastupdated` (e.g. "2025-07-01"); `None` if the API ever
    /// sends something unexpected.
    pub fn last_updated(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.lastupdated, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorRef {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryRef {
    pub id: String,
    pub value: String,
}

/// One observation exactly as the wire format delivers it: descending by
/// year, `date` as a string, `value` null when the country did not report.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub indicator: IndicatorRef,
    pub country: CountryRef,
    #[serde(default)]
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub obs_status: String,
    #[serde(default)]
    pub decimal: i32,
}

/// A normalized observation. `value` of `None` means "not reported",
/// which is never the same thing as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionRecord {
    pub year: i32,
    pub value: Option<f64>,
}

/// One country's normalized records: ascending by year, at most one record
/// per year. Only `services::normalize` builds these.
#[derive(Debug, Clone)]
pub struct CountryRecordSet {
    pub country: String,
    pub records: Vec<EmissionRecord>,
}

/// Inclusive year window restricting a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearRange {
    pub fn new(start_year: i32, end_year: i32) -> Option<Self> {
        if start_year <= end_year {
            Some(YearRange { start_year, end_year })
        } else {
            None
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Percent change between the earliest and latest reported years.
/// `magnitude` is non-negative and rounded to one decimal; the sign lives
/// in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentChange {
    pub magnitude: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakYear {
    pub year: i32,
    pub value: f64,
}

/// One chart series aligned to a shared year axis. `None` slots mark years
/// the country has no reported value for; chart consumers skip them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiSeries {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

/// Per-year average across countries; `averages[i]` is `None` when no
/// country reported a value for `years[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalAverage {
    pub years: Vec<i32>,
    pub averages: Vec<Option<f64>>,
}

/// One comparison-table row. Null fields render as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRow {
    pub country: String,
    pub percent_change: Option<PercentChange>,
    pub total_emissions: Option<f64>,
    pub percentage_of_total: Option<f64>,
}

/// Single-country overview: the card statistics plus the historical
/// yearly chart (`years` as x-axis labels, `values` aligned to them).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    pub country: String,
    pub total_emissions: Option<f64>,
    pub peak_year: Option<PeakYear>,
    pub percent_change: Option<PercentChange>,
    pub years: Vec<i32>,
    pub values: Vec<Option<f64>>,
    pub last_updated: Option<String>,
}
