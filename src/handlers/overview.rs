// src/handlers/overview.rs
use log::{error, info};
use warp::reply::Json;
use warp::Rejection;

use crate::models::{CountryRecordSet, CountrySummary};
use crate::services::normalize::normalize_set;
use crate::services::series::{build_series, year_axis};
use crate::services::stats::{compute_percent_change, compute_total, find_peak_year};
use crate::services::worldbank::fetch_emissions;

use super::error::ApiError;

/// Single-country overview: total emissions, peak year, percent change,
/// the full yearly series for the historical chart, and the date the
/// World Bank last refreshed the indicator. Statistics that cannot be
/// computed from the available observations come back as JSON nulls for
/// the UI to render as "N/A".
pub async fn get_country_summary(country: String) -> Result<Json, Rejection> {
    info!("Handling summary request for {}", country);

    let (meta, raw) = match fetch_emissions(&country).await {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to fetch emissions for {}: {}", country, e);
            return Err(warp::reject::custom(ApiError::upstream(e)));
        }
    };

    let set = normalize_set(&country, &raw);
    let (years, values) = chart_data(&set);
    let summary = CountrySummary {
        total_emissions: compute_total(&set.records, None).ok(),
        peak_year: find_peak_year(&set.records, None).ok(),
        percent_change: compute_percent_change(&set.records, None).ok(),
        years,
        values,
        last_updated: meta.last_updated().map(|d| d.to_string()),
        country,
    };

    Ok(warp::reply::json(&summary))
}

/// Yearly chart backing for one country: ascending year labels and the
/// values aligned to them.
fn chart_data(set: &CountryRecordSet) -> (Vec<i32>, Vec<Option<f64>>) {
    let sets = std::slice::from_ref(set);
    let years = year_axis(sets, None);
    let values = build_series(sets, None)
        .pop()
        .map(|s| s.data)
        .unwrap_or_default();
    (years, values)
}
