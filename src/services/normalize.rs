// src/services/normalize.rs
use crate::models::{CountryRecordSet, EmissionRecord, RawObservation, YearRange};

/// Turn raw API observations into chronologically ascending records.
///
/// The API delivers records newest-first with string-typed years; this is
/// the one place in the crate that parses years and imposes order. Every
/// downstream computation assumes its input came through here. The input
/// slice is never mutated.
///
/// Records whose year does not parse as an integer are dropped. Records
/// with an absent value are kept; the calculators filter those themselves.
pub fn normalize(raw: &[RawObservation], range: Option<YearRange>) -> Vec<EmissionRecord> {
    let mut records: Vec<EmissionRecord> = raw
        .iter()
        .filter_map(|obs| {
            let year = obs.date.trim().parse::<i32>().ok()?;
            Some(EmissionRecord {
                year,
                value: obs.value,
            })
        })
        .filter(|r| range.map_or(true, |w| w.contains(r.year)))
        .collect();
    records.sort_by_key(|r| r.year);
    records
}

/// Normalized record set for one country, full history.
pub fn normalize_set(country: &str, raw: &[RawObservation]) -> CountryRecordSet {
    CountryRecordSet {
        country: country.to_string(),
        records: normalize(raw, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryRef, IndicatorRef};

    fn obs(date: &str, value: Option<f64>) -> RawObservation {
        RawObservation {
            indicator: IndicatorRef {
                id: "EN.GHG.ALL.MT.CE.AR5".into(),
                value: "Total greenhouse gas emissions".into(),
            },
            country: CountryRef {
                id: "US".into(),
                value: "United States".into(),
            },
            countryiso3code: "USA".into(),
            date: date.into(),
            value,
            unit: String::new(),
            obs_status: String::new(),
            decimal: 0,
        }
    }

    #[test]
    fn sorts_descending_input_ascending() {
        let raw = vec![obs("2022", Some(3.0)), obs("2020", Some(1.0)), obs("2021", None)];
        let records = normalize(&raw, None);
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        // absent values survive normalization
        assert_eq!(records[1].value, None);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(normalize(&[], None).is_empty());
    }

    #[test]
    fn range_filter_is_inclusive_and_numeric() {
        let raw = vec![
            obs("2015", Some(5.0)),
            obs("2010", Some(1.0)),
            obs("2009", Some(9.0)),
            obs("2016", Some(6.0)),
        ];
        let range = YearRange::new(2010, 2015);
        let records = normalize(&raw, range);
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2010, 2015]);
    }

    #[test]
    fn unparseable_years_are_dropped() {
        let raw = vec![obs("2020", Some(1.0)), obs("n/a", Some(2.0))];
        let records = normalize(&raw, None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2020);
    }

    #[test]
    fn normalize_is_idempotent_over_refetches() {
        let raw = vec![obs("2021", Some(2.0)), obs("2020", Some(1.0))];
        assert_eq!(normalize(&raw, None), normalize(&raw, None));
    }
}
