use crate::error::{HurricaneError, Result};
use crate::model::{Dataset, Month, TransformedSummary};

/// Sum occurrence counts into per-year and per-month totals.
///
/// Only true year columns contribute; the `Average` column is a derived
/// statistic, not an occurrence count, and never enters the sums. Addition
/// is commutative, so the result is independent of iteration order.
pub fn transform(dataset: &Dataset) -> Result<TransformedSummary> {
    let mut summary = TransformedSummary::default();
    for (month, record) in dataset.iter() {
        for (year, count) in &record.counts {
            accumulate(summary.years.entry(year.clone()).or_insert(0), *count)
                .map_err(|_| overflow(month, year))?;
            accumulate(summary.months.entry(month).or_insert(0), *count)
                .map_err(|_| overflow(month, year))?;
        }
    }
    Ok(summary)
}

fn accumulate(slot: &mut u64, count: u64) -> std::result::Result<(), ()> {
    *slot = slot.checked_add(count).ok_or(())?;
    Ok(())
}

fn overflow(month: Month, year: &str) -> HurricaneError {
    HurricaneError::Transform(format!(
        "occurrence total overflowed while adding {month}/{year}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthRecord;
    use std::collections::BTreeMap;

    fn record(counts: &[(&str, u64)], average: f64) -> MonthRecord {
        MonthRecord {
            counts: counts
                .iter()
                .map(|(y, c)| (y.to_string(), *c))
                .collect(),
            average,
        }
    }

    fn sample_dataset() -> Dataset {
        let mut dataset = Dataset::default();
        dataset.insert(Month::May, record(&[("2005", 1), ("2006", 0)], 0.10));
        dataset.insert(Month::Jun, record(&[("2005", 2), ("2006", 1)], 1.50));
        dataset.insert(Month::Jul, record(&[("2005", 3), ("2006", 2)], 2.50));
        dataset
    }

    #[test]
    fn sums_per_year_and_per_month() {
        let summary = transform(&sample_dataset()).unwrap();
        assert_eq!(summary.years.get("2005"), Some(&6));
        assert_eq!(summary.years.get("2006"), Some(&3));
        assert_eq!(summary.months.get(&Month::May), Some(&1));
        assert_eq!(summary.months.get(&Month::Jun), Some(&3));
        assert_eq!(summary.months.get(&Month::Jul), Some(&5));
    }

    #[test]
    fn average_never_enters_the_sums() {
        let mut dataset = Dataset::default();
        dataset.insert(Month::May, record(&[("2005", 1)], 400.0));
        let summary = transform(&dataset).unwrap();
        assert_eq!(summary.years.get("2005"), Some(&1));
        assert_eq!(summary.months.get(&Month::May), Some(&1));
        assert_eq!(summary.years.len(), 1);
    }

    #[test]
    fn empty_dataset_gives_empty_summary() {
        let summary = transform(&Dataset::default()).unwrap();
        assert!(summary.years.is_empty());
        assert!(summary.months.is_empty());
    }

    #[test]
    fn months_with_only_average_contribute_nothing() {
        let mut dataset = Dataset::default();
        dataset.insert(
            Month::May,
            MonthRecord {
                counts: BTreeMap::new(),
                average: 0.40,
            },
        );
        let summary = transform(&dataset).unwrap();
        assert!(summary.years.is_empty());
        assert!(summary.months.is_empty());
    }

    #[test]
    fn transform_is_idempotent() {
        let dataset = sample_dataset();
        let first = transform(&dataset).unwrap();
        let second = transform(&dataset).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn overflow_is_a_transform_error() {
        let mut dataset = Dataset::default();
        dataset.insert(Month::May, record(&[("2005", u64::MAX)], 0.10));
        dataset.insert(Month::Jun, record(&[("2005", 1)], 0.10));
        match transform(&dataset) {
            Err(HurricaneError::Transform(msg)) => assert!(msg.contains("overflow")),
            other => panic!("expected Transform error, got {other:?}"),
        }
    }
}
