// src/services/table.rs
use crate::models::{CompareRow, CountryRecordSet, YearRange};

use super::stats::{compute_percent_change, compute_total, round1};

/// Rows for the comparison table, one per country in the caller's order
/// (the user's selection order, not alphabetical).
///
/// `aggregate_total` is the shared denominator from
/// [`super::aggregate::aggregate_totals`]. Any statistic that cannot be
/// computed becomes `None` in its row; `percentageOfTotal` in particular
/// is `None` whenever the country has no total or the denominator is zero
/// or non-finite, so no row ever carries a NaN or infinity.
pub fn assemble_rows(
    sets: &[CountryRecordSet],
    aggregate_total: f64,
    range: Option<YearRange>,
) -> Vec<CompareRow> {
    sets.iter()
        .map(|set| {
            let percent_change = compute_percent_change(&set.records, range).ok();
            let total_emissions = compute_total(&set.records, range).ok();
            let percentage_of_total = total_emissions.and_then(|total| {
                if aggregate_total.is_finite() && aggregate_total > 0.0 {
                    Some(round1((total / aggregate_total) * 100.0))
                } else {
                    None
                }
            });
            CompareRow {
                country: set.country.clone(),
                percent_change,
                total_emissions,
                percentage_of_total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, EmissionRecord};
    use crate::services::aggregate::aggregate_totals;

    fn set(country: &str, records: Vec<(i32, Option<f64>)>) -> CountryRecordSet {
        CountryRecordSet {
            country: country.to_string(),
            records: records
                .into_iter()
                .map(|(year, value)| EmissionRecord { year, value })
                .collect(),
        }
    }

    #[test]
    fn rows_mirror_caller_supplied_order() {
        let sets = vec![
            set("US", vec![(2000, Some(300.0)), (2001, Some(450.0))]),
            set("BR", vec![(2000, Some(100.0)), (2001, Some(150.0))]),
        ];
        let aggregate = aggregate_totals(&sets, None).unwrap();
        let rows = assemble_rows(&sets, aggregate, None);
        assert_eq!(rows[0].country, "US");
        assert_eq!(rows[1].country, "BR");
        assert_eq!(rows[0].total_emissions, Some(750.0));
        assert_eq!(rows[0].percentage_of_total, Some(75.0));
        assert_eq!(rows[1].percentage_of_total, Some(25.0));
        let change = rows[0].percent_change.unwrap();
        assert_eq!(change.magnitude, 50.0);
        assert_eq!(change.direction, Direction::Increase);
    }

    #[test]
    fn no_data_country_gets_null_fields() {
        let sets = vec![
            set("US", vec![(2000, Some(10.0))]),
            set("BR", vec![(2000, None)]),
        ];
        let aggregate = aggregate_totals(&sets, None).unwrap();
        let rows = assemble_rows(&sets, aggregate, None);
        assert_eq!(rows[1].percent_change, None);
        assert_eq!(rows[1].total_emissions, None);
        assert_eq!(rows[1].percentage_of_total, None);
    }

    #[test]
    fn zero_aggregate_never_yields_non_finite_percentages() {
        // Every country reports only zeros, so the denominator is 0.
        let sets = vec![set("US", vec![(2000, Some(0.0))])];
        let aggregate = aggregate_totals(&sets, None).unwrap();
        assert_eq!(aggregate, 0.0);
        let rows = assemble_rows(&sets, aggregate, None);
        assert_eq!(rows[0].total_emissions, Some(0.0));
        assert_eq!(rows[0].percentage_of_total, None);
    }

    #[test]
    fn range_restricts_row_statistics() {
        let sets = vec![set(
            "US",
            vec![(2000, Some(100.0)), (2010, Some(200.0)), (2020, Some(400.0))],
        )];
        let range = YearRange::new(2000, 2010);
        let aggregate = aggregate_totals(&sets, range).unwrap();
        let rows = assemble_rows(&sets, aggregate, range);
        assert_eq!(rows[0].total_emissions, Some(300.0));
        assert_eq!(rows[0].percent_change.unwrap().magnitude, 100.0);
    }
}
