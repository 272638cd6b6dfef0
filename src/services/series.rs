// src/services/series.rs
use std::collections::BTreeSet;

use crate::models::{CountryRecordSet, MultiSeries, YearRange};

/// The shared chart x-axis over the given sets: every year of the range
/// when one is supplied, otherwise the sorted union of years observed
/// across the sets.
pub fn year_axis(sets: &[CountryRecordSet], range: Option<YearRange>) -> Vec<i32> {
    match range {
        Some(w) => (w.start_year..=w.end_year).collect(),
        None => {
            let years: BTreeSet<i32> = sets
                .iter()
                .flat_map(|s| s.records.iter().map(|r| r.year))
                .collect();
            years.into_iter().collect()
        }
    }
}

/// One aligned series per country, in the caller's country order. Every
/// non-empty series has one slot per axis year, `None` where the country
/// has no reported value. A country whose data has not arrived yet yields
/// an empty series (the UI's loading state), never an error.
pub fn build_series(sets: &[CountryRecordSet], range: Option<YearRange>) -> Vec<MultiSeries> {
    let axis = year_axis(sets, range);
    sets.iter()
        .map(|set| {
            let data = if set.records.is_empty() {
                Vec::new()
            } else {
                axis.iter().map(|&year| value_at(set, year)).collect()
            };
            MultiSeries {
                label: set.country.clone(),
                data,
            }
        })
        .collect()
}

// Records are ascending with one record per year, so lookup can bisect.
fn value_at(set: &CountryRecordSet, year: i32) -> Option<f64> {
    set.records
        .binary_search_by_key(&year, |r| r.year)
        .ok()
        .and_then(|i| set.records[i].value)
}

/// Running totals for the cumulative chart. Slots before a country's first
/// reported year stay `None`; later gaps carry the total forward so the
/// stack never dips.
pub fn cumulative_series(series: &[MultiSeries]) -> Vec<MultiSeries> {
    series
        .iter()
        .map(|s| {
            let mut running = 0.0;
            let mut seen = false;
            let data = s
                .data
                .iter()
                .map(|slot| {
                    if let Some(v) = slot {
                        running += v;
                        seen = true;
                    }
                    if seen {
                        Some(running)
                    } else {
                        None
                    }
                })
                .collect();
            MultiSeries {
                label: s.label.clone(),
                data,
            }
        })
        .collect()
}
