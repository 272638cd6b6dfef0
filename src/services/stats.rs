// src/services/stats.rs
use std::fmt;

use log::warn;

use crate::models::{Direction, EmissionRecord, PeakYear, PercentChange, YearRange};

/// Failure modes of the statistic calculators. All are recoverable: the
/// handlers map them to JSON nulls ("N/A" in the UI), never to a 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatError {
    /// Fewer valid observations than the statistic needs. Also covers a
    /// zero-valued baseline in percent change, which would otherwise
    /// produce a non-finite number.
    InsufficientData,
    /// An aggregate was requested over zero country sets.
    EmptyAggregate,
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatError::InsufficientData => write!(f, "not enough valid observations"),
            StatError::EmptyAggregate => write!(f, "aggregate requested over zero country sets"),
        }
    }
}

impl std::error::Error for StatError {}

/// Round to one decimal place, the precision every percentage in the UI
/// is displayed with.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Reported observations within the window, in the input's ascending year
/// order. Absent values never reach a calculation.
fn valid_in_range(
    records: &[EmissionRecord],
    range: Option<YearRange>,
) -> impl Iterator<Item = (i32, f64)> + '_ {
    records
        .iter()
        .filter(move |r| range.map_or(true, |w| w.contains(r.year)))
        .filter_map(|r| r.value.map(|v| (r.year, v)))
}

/// Sum of reported emissions over the window, rounded to the nearest whole
/// unit. A window with no reported values is `InsufficientData`, never 0:
/// "nothing reported" and "measured zero" must stay distinguishable.
pub fn compute_total(
    records: &[EmissionRecord],
    range: Option<YearRange>,
) -> Result<f64, StatError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (_, value) in valid_in_range(records, range) {
        sum += value;
        count += 1;
    }
    if count == 0 {
        warn!("No valid observations in window for total emissions");
        return Err(StatError::InsufficientData);
    }
    Ok(sum.round())
}

/// Percent change from the earliest to the latest reported year in the
/// window. Needs at least two reported years and a non-zero baseline.
pub fn compute_percent_change(
    records: &[EmissionRecord],
    range: Option<YearRange>,
) -> Result<PercentChange, StatError> {
    let valid: Vec<(i32, f64)> = valid_in_range(records, range).collect();
    if valid.len() < 2 {
        warn!(
            "Insufficient valid data points ({}) for percent change",
            valid.len()
        );
        return Err(StatError::InsufficientData);
    }

    let (_, earliest) = valid[0];
    let (_, latest) = valid[valid.len() - 1];
    if earliest == 0.0 {
        warn!("Baseline emissions are zero, percent change undefined");
        return Err(StatError::InsufficientData);
    }

    let difference = latest - earliest;
    let direction = if difference < 0.0 {
        Direction::Decrease
    } else {
        Direction::Increase
    };
    Ok(PercentChange {
        magnitude: round1((difference / earliest) * 100.0).abs(),
        direction,
    })
}

/// The reported observation with the highest value in the window. Ties go
/// to the earliest such year.
pub fn find_peak_year(
    records: &[EmissionRecord],
    range: Option<YearRange>,
) -> Result<PeakYear, StatError> {
    let mut best: Option<PeakYear> = None;
    for (year, value) in valid_in_range(records, range) {
        let better = match best {
            Some(b) => value > b.value,
            None => true,
        };
        if better {
            best = Some(PeakYear { year, value });
        }
    }
    best.ok_or_else(|| {
        warn!("No valid observations for peak year");
        StatError::InsufficientData
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, value: Option<f64>) -> EmissionRecord {
        EmissionRecord { year, value }
    }

    #[test]
    fn total_sums_and_rounds() {
        let records = vec![rec(2000, Some(1.4)), rec(2001, None), rec(2002, Some(2.3))];
        assert_eq!(compute_total(&records, None), Ok(4.0));
    }

    #[test]
    fn total_with_no_valid_records_is_insufficient() {
        assert_eq!(
            compute_total(&[rec(2000, None)], None),
            Err(StatError::InsufficientData)
        );
        assert_eq!(compute_total(&[], None), Err(StatError::InsufficientData));
    }

    #[test]
    fn total_is_invariant_under_reordering() {
        let a = vec![rec(2000, Some(1.0)), rec(2001, Some(2.0)), rec(2002, Some(3.0))];
        let b = vec![rec(2002, Some(3.0)), rec(2000, Some(1.0)), rec(2001, Some(2.0))];
        assert_eq!(compute_total(&a, None), compute_total(&b, None));
    }

    #[test]
    fn total_respects_range_and_empty_intersection() {
        let records = vec![rec(2000, Some(10.0)), rec(2010, Some(20.0)), rec(2020, Some(30.0))];
        let range = YearRange::new(2010, 2015);
        assert_eq!(compute_total(&records, range), Ok(20.0));
        assert_eq!(
            compute_total(&records, YearRange::new(2001, 2009)),
            Err(StatError::InsufficientData)
        );
    }

    #[test]
    fn percent_change_matches_formula() {
        // (300 - 200) / 200 * 100 = 50.0
        let records = vec![rec(2000, Some(200.0)), rec(2001, None), rec(2023, Some(300.0))];
        let change = compute_percent_change(&records, None).unwrap();
        assert_eq!(change.magnitude, 50.0);
        assert_eq!(change.direction, Direction::Increase);
    }

    #[test]
    fn percent_change_decrease_carries_sign_in_direction() {
        let records = vec![rec(2000, Some(400.0)), rec(2023, Some(300.0))];
        let change = compute_percent_change(&records, None).unwrap();
        assert_eq!(change.magnitude, 25.0);
        assert_eq!(change.direction, Direction::Decrease);
    }

    #[test]
    fn percent_change_rounds_to_one_decimal() {
        // (110 - 90) / 90 * 100 = 22.222... -> 22.2
        let records = vec![rec(2000, Some(90.0)), rec(2001, Some(110.0))];
        let change = compute_percent_change(&records, None).unwrap();
        assert_eq!(change.magnitude, 22.2);
    }

    #[test]
    fn percent_change_needs_two_valid_records() {
        let records = vec![rec(2000, Some(100.0)), rec(2001, None)];
        assert_eq!(
            compute_percent_change(&records, None),
            Err(StatError::InsufficientData)
        );
    }

    #[test]
    fn percent_change_guards_zero_baseline() {
        let records = vec![rec(2000, Some(0.0)), rec(2001, Some(50.0))];
        assert_eq!(
            compute_percent_change(&records, None),
            Err(StatError::InsufficientData)
        );
    }

    #[test]
    fn peak_year_prefers_first_max_in_ascending_order() {
        let records = vec![
            rec(2000, Some(100.0)),
            rec(2001, Some(300.0)),
            rec(2002, Some(300.0)),
        ];
        assert_eq!(
            find_peak_year(&records, None),
            Ok(PeakYear { year: 2001, value: 300.0 })
        );
    }

    #[test]
    fn peak_year_skips_absent_values() {
        let records = vec![rec(2000, None), rec(2001, Some(5.0)), rec(2002, None)];
        assert_eq!(
            find_peak_year(&records, None),
            Ok(PeakYear { year: 2001, value: 5.0 })
        );
        assert_eq!(
            find_peak_year(&[rec(2000, None)], None),
            Err(StatError::InsufficientData)
        );
    }
}
