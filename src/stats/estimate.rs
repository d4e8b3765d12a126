use tracing::debug;

use crate::error::{HurricaneError, Result};
use crate::model::{round2, Dataset, Month};

/// Substituted rate when the recorded mean is exactly zero, so the estimate
/// never degenerates to a flat 0%.
const ZERO_AVERAGE_SUBSTITUTE: f64 = 0.01;

/// Possibility of at least one hurricane in `month`, as a percentage with
/// two fraction digits.
///
/// Treats the month's historical mean as the rate of a Poisson process:
/// `P(N >= 1) = 1 - e^(-avg)`. A month with no entry in the dataset yields
/// `Ok(None)` — an absent prediction is a valid outcome, not a failure.
pub fn possibility_for_month(month: Month, dataset: &Dataset) -> Result<Option<f64>> {
    let Some(record) = dataset.get(month) else {
        debug!(month = %month, "no record for month");
        return Ok(None);
    };

    let mut avg = record.average;
    if !avg.is_finite() {
        return Err(HurricaneError::Calculation {
            month,
            reason: format!("stored average {avg} is not a finite number"),
        });
    }
    if avg == 0.0 {
        avg = ZERO_AVERAGE_SUBSTITUTE;
    }

    let probability_of_zero = (-avg).exp();
    let probability_of_at_least_one = 1.0 - probability_of_zero;
    Ok(Some(round2(probability_of_at_least_one * 100.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthRecord;
    use std::collections::BTreeMap;

    fn dataset_with(month: Month, average: f64) -> Dataset {
        let mut dataset = Dataset::default();
        dataset.insert(
            month,
            MonthRecord {
                counts: BTreeMap::from([("2005".to_string(), 1)]),
                average,
            },
        );
        dataset
    }

    #[test]
    fn documented_fixture_average_0_10_gives_9_52() {
        let dataset = dataset_with(Month::May, 0.10);
        assert_eq!(possibility_for_month(Month::May, &dataset).unwrap(), Some(9.52));
    }

    #[test]
    fn average_0_50_gives_39_35() {
        let dataset = dataset_with(Month::Sep, 0.50);
        assert_eq!(
            possibility_for_month(Month::Sep, &dataset).unwrap(),
            Some(39.35)
        );
    }

    #[test]
    fn zero_average_is_substituted_and_never_yields_zero() {
        let dataset = dataset_with(Month::Feb, 0.0);
        let p = possibility_for_month(Month::Feb, &dataset)
            .unwrap()
            .unwrap();
        assert!(p > 0.0);
        // 1 - e^(-0.01), as a rounded percentage
        assert_eq!(p, 1.0);
    }

    #[test]
    fn absent_month_is_none_not_an_error() {
        let dataset = dataset_with(Month::May, 0.10);
        assert_eq!(possibility_for_month(Month::Jan, &dataset).unwrap(), None);
    }

    #[test]
    fn non_finite_average_is_a_calculation_error() {
        let dataset = dataset_with(Month::Oct, f64::NAN);
        match possibility_for_month(Month::Oct, &dataset) {
            Err(HurricaneError::Calculation { month, .. }) => assert_eq!(month, Month::Oct),
            other => panic!("expected Calculation error, got {other:?}"),
        }
    }

    #[test]
    fn large_average_saturates_toward_one_hundred() {
        let dataset = dataset_with(Month::Aug, 9.0);
        let p = possibility_for_month(Month::Aug, &dataset)
            .unwrap()
            .unwrap();
        assert_eq!(p, 99.99);
    }
}
