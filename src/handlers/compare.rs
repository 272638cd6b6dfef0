// src/handlers/compare.rs
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use crate::models::{CompareRow, GlobalAverage, MultiSeries, YearRange};
use crate::services::aggregate::{aggregate_totals, global_average};
use crate::services::normalize::normalize_set;
use crate::services::series::{build_series, cumulative_series, year_axis};
use crate::services::table::assemble_rows;
use crate::services::worldbank::fetch_emissions;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQuery {
    /// Comma-separated country codes, in the user's selection order.
    pub countries: String,
    /// `startYear` and `endYear` must be supplied together or not at all.
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// Year window from the query parameters. Both bounds or neither; a
/// half-specified or inverted window is a caller bug, not a request for
/// full history.
fn parse_range(start: Option<i32>, end: Option<i32>) -> Result<Option<YearRange>, ApiError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => YearRange::new(start, end)
            .map(Some)
            .ok_or_else(|| ApiError::new("startYear must not exceed endYear")),
        _ => Err(ApiError::new(
            "startYear and endYear must be supplied together",
        )),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    rows: Vec<CompareRow>,
    years: Vec<i32>,
    series: Vec<MultiSeries>,
    cumulative: Vec<MultiSeries>,
    global_average: GlobalAverage,
    errors: Vec<String>,
}

/// Multi-country comparison payload: table rows, yearly and cumulative
/// chart series, and the cross-country average, all restricted to the
/// requested year window when one is given.
///
/// Countries are fetched one request at a time; a failed country is
/// dropped from the data set and its message surfaced in `errors` so the
/// remaining countries still render.
pub async fn get_comparison(query: CompareQuery) -> Result<Json, Rejection> {
    let codes: Vec<&str> = query
        .countries
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    info!("Handling comparison request for {:?}", codes);

    if codes.is_empty() {
        return Err(warp::reject::custom(ApiError::new("No countries requested")));
    }

    let range = parse_range(query.start_year, query.end_year)
        .map_err(warp::reject::custom)?;

    let mut sets = Vec::with_capacity(codes.len());
    let mut errors = Vec::new();
    for code in codes {
        match fetch_emissions(code).await {
            Ok((_, raw)) => sets.push(normalize_set(code, &raw)),
            Err(e) => {
                error!("Error fetching data for {}: {}", code, e);
                errors.push(format!("{}: {}", code, e));
            }
        }
    }

    let rows = match aggregate_totals(&sets, range) {
        Ok(aggregate) => assemble_rows(&sets, aggregate, range),
        Err(e) => {
            warn!("No aggregate available: {}", e);
            Vec::new()
        }
    };

    let series = build_series(&sets, range);
    let response = CompareResponse {
        rows,
        years: year_axis(&sets, range),
        cumulative: cumulative_series(&series),
        series,
        global_average: global_average(&sets, range),
        errors,
    };
    Ok(warp::reply::json(&response))
}
