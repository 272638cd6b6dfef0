// src/services/aggregate.rs
use std::collections::BTreeMap;

use log::warn;

use crate::models::{CountryRecordSet, GlobalAverage, YearRange};

use super::stats::{compute_total, StatError};

/// Sum of per-country totals over the window, the shared denominator for
/// percentage-of-whole. Countries with nothing reported in the window
/// contribute nothing; requesting an aggregate over zero sets is an error
/// so the division downstream can never see an accidental empty sum.
pub fn aggregate_totals(
    sets: &[CountryRecordSet],
    range: Option<YearRange>,
) -> Result<f64, StatError> {
    if sets.is_empty() {
        warn!("Aggregate requested before any country data exists");
        return Err(StatError::EmptyAggregate);
    }
    let mut sum = 0.0;
    for set in sets {
        if let Ok(total) = compute_total(&set.records, range) {
            sum += total;
        }
    }
    Ok(sum)
}

/// Per-year average across countries, over the sorted union of all years
/// the sets cover. Countries are averaged only for years they actually
/// reported; a year nobody reported averages to `None`, never 0. The sets
/// need not agree on length or year coverage.
pub fn global_average(
    sets: &[CountryRecordSet],
    range: Option<YearRange>,
) -> GlobalAverage {
    let mut buckets: BTreeMap<i32, (f64, u32)> = BTreeMap::new();
    for set in sets {
        for record in &set.records {
            if let Some(w) = range {
                if !w.contains(record.year) {
                    continue;
                }
            }
            let bucket = buckets.entry(record.year).or_insert((0.0, 0));
            if let Some(value) = record.value {
                bucket.0 += value;
                bucket.1 += 1;
            }
        }
    }

    let mut years = Vec::with_capacity(buckets.len());
    let mut averages = Vec::with_capacity(buckets.len());
    for (year, (sum, count)) in buckets {
        years.push(year);
        averages.push(if count > 0 {
            Some(sum / f64::from(count))
        } else {
            None
        });
    }
    GlobalAverage { years, averages }
}
