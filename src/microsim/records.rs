//! Per-unit simulation records and outcome classification

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Relative change category for one household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeBucket {
    /// Percent change above 5
    GainMoreThan5Pct,
    /// Percent change in (0, 5]
    GainLessThan5Pct,
    /// Percent change exactly 0
    NoChange,
    /// Percent change in [-5, 0)
    LoseLessThan5Pct,
    /// Percent change below -5
    LoseMoreThan5Pct,
}

impl OutcomeBucket {
    /// All buckets, gains first
    pub const ALL: [OutcomeBucket; 5] = [
        OutcomeBucket::GainMoreThan5Pct,
        OutcomeBucket::GainLessThan5Pct,
        OutcomeBucket::NoChange,
        OutcomeBucket::LoseLessThan5Pct,
        OutcomeBucket::LoseMoreThan5Pct,
    ];

    /// Classify a percent change
    ///
    /// Expects a finite value; [`HouseholdArrays`] rejects non-finite incomes.
    pub fn classify(pct_change: f64) -> Self {
        if pct_change > 5.0 {
            OutcomeBucket::GainMoreThan5Pct
        } else if pct_change > 0.0 {
            OutcomeBucket::GainLessThan5Pct
        } else if pct_change == 0.0 {
            OutcomeBucket::NoChange
        } else if pct_change >= -5.0 {
            OutcomeBucket::LoseLessThan5Pct
        } else {
            OutcomeBucket::LoseMoreThan5Pct
        }
    }

    pub fn index(&self) -> usize {
        match self {
            OutcomeBucket::GainMoreThan5Pct => 0,
            OutcomeBucket::GainLessThan5Pct => 1,
            OutcomeBucket::NoChange => 2,
            OutcomeBucket::LoseLessThan5Pct => 3,
            OutcomeBucket::LoseMoreThan5Pct => 4,
        }
    }

    /// Column label used in tables and chart data
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeBucket::GainMoreThan5Pct => "Gain more than 5%",
            OutcomeBucket::GainLessThan5Pct => "Gain less than 5%",
            OutcomeBucket::NoChange => "No change",
            OutcomeBucket::LoseLessThan5Pct => "Lose less than 5%",
            OutcomeBucket::LoseMoreThan5Pct => "Lose more than 5%",
        }
    }

    /// Short legend label
    pub fn legend(&self) -> &'static str {
        match self {
            OutcomeBucket::GainMoreThan5Pct => "Gain >5%",
            OutcomeBucket::GainLessThan5Pct => "Gain <5%",
            OutcomeBucket::NoChange => "No change",
            OutcomeBucket::LoseLessThan5Pct => "Loss <5%",
            OutcomeBucket::LoseMoreThan5Pct => "Loss >5%",
        }
    }
}

/// One simulated household under both scenarios
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseholdRecord {
    pub baseline_net_income: f64,
    pub reform_net_income: f64,
    /// Income decile as reported by the engine (1 = lowest)
    pub income_decile: i32,
    pub weight: f64,
}

impl HouseholdRecord {
    /// Dollar change in net income
    pub fn change(&self) -> f64 {
        self.reform_net_income - self.baseline_net_income
    }

    /// Percent change; 0 when baseline income is not positive
    pub fn pct_change(&self) -> f64 {
        if self.baseline_net_income > 0.0 {
            self.change() / self.baseline_net_income * 100.0
        } else {
            0.0
        }
    }

    pub fn outcome(&self) -> OutcomeBucket {
        OutcomeBucket::classify(self.pct_change())
    }

    /// Zero-based decile slot, or `None` when the engine reported no decile
    pub fn decile_index(&self) -> Option<usize> {
        if (1..=10).contains(&self.income_decile) {
            Some((self.income_decile - 1) as usize)
        } else {
            None
        }
    }
}

/// Column-oriented household arrays from a baseline/reform simulation pair
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdArrays {
    baseline: Vec<f64>,
    reform: Vec<f64>,
    decile: Vec<f64>,
    weight: Vec<f64>,
}

impl HouseholdArrays {
    /// Validate and wrap engine arrays
    ///
    /// All arrays must have the same length, net incomes must be finite and
    /// every weight must be a finite non-negative number.
    pub fn new(baseline: Vec<f64>, reform: Vec<f64>, decile: Vec<f64>, weight: Vec<f64>) -> Result<Self> {
        let expected = baseline.len();
        for (field, len) in [
            ("reform_net_income", reform.len()),
            ("income_decile", decile.len()),
            ("weight", weight.len()),
        ] {
            if len != expected {
                return Err(AnalysisError::LengthMismatch {
                    field,
                    expected,
                    actual: len,
                });
            }
        }

        for (field, values) in [("baseline_net_income", &baseline), ("reform_net_income", &reform)] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(AnalysisError::InvalidIncome { field, index, value });
            }
        }

        if let Some((index, &w)) = weight
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(AnalysisError::InvalidWeight { index, weight: w });
        }

        Ok(Self {
            baseline,
            reform,
            decile,
            weight,
        })
    }

    /// Build from per-household records, with the same checks as [`HouseholdArrays::new`]
    pub fn from_records<I: IntoIterator<Item = HouseholdRecord>>(records: I) -> Result<Self> {
        let (mut baseline, mut reform, mut decile, mut weight) =
            (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        for r in records {
            baseline.push(r.baseline_net_income);
            reform.push(r.reform_net_income);
            decile.push(r.income_decile as f64);
            weight.push(r.weight);
        }
        Self::new(baseline, reform, decile, weight)
    }

    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = HouseholdRecord> + '_ {
        (0..self.len()).map(move |i| HouseholdRecord {
            baseline_net_income: self.baseline[i],
            reform_net_income: self.reform[i],
            income_decile: self.decile[i].round() as i32,
            weight: self.weight[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(baseline: f64, reform: f64) -> HouseholdRecord {
        HouseholdRecord {
            baseline_net_income: baseline,
            reform_net_income: reform,
            income_decile: 1,
            weight: 1.0,
        }
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(OutcomeBucket::classify(5.01), OutcomeBucket::GainMoreThan5Pct);
        assert_eq!(OutcomeBucket::classify(5.0), OutcomeBucket::GainLessThan5Pct);
        assert_eq!(OutcomeBucket::classify(0.001), OutcomeBucket::GainLessThan5Pct);
        assert_eq!(OutcomeBucket::classify(0.0), OutcomeBucket::NoChange);
        assert_eq!(OutcomeBucket::classify(-0.001), OutcomeBucket::LoseLessThan5Pct);
        assert_eq!(OutcomeBucket::classify(-5.0), OutcomeBucket::LoseLessThan5Pct);
        assert_eq!(OutcomeBucket::classify(-5.01), OutcomeBucket::LoseMoreThan5Pct);
    }

    #[test]
    fn test_five_percent_gain_is_inclusive() {
        let r = record(1_000.0, 1_050.0);
        assert!((r.pct_change() - 5.0).abs() < 1e-12);
        assert_eq!(r.outcome(), OutcomeBucket::GainLessThan5Pct);
    }

    #[test]
    fn test_non_positive_baseline_is_no_change() {
        assert_eq!(record(0.0, 375.0).outcome(), OutcomeBucket::NoChange);
        assert_eq!(record(-500.0, -125.0).outcome(), OutcomeBucket::NoChange);
    }

    #[test]
    fn test_bucket_indices_follow_order() {
        for (i, bucket) in OutcomeBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
        }
    }

    #[test]
    fn test_decile_index() {
        let mut r = record(1.0, 1.0);
        assert_eq!(r.decile_index(), Some(0));
        r.income_decile = 10;
        assert_eq!(r.decile_index(), Some(9));
        r.income_decile = 0;
        assert_eq!(r.decile_index(), None);
        r.income_decile = -1;
        assert_eq!(r.decile_index(), None);
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let result = HouseholdArrays::new(vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0], vec![1.0, 1.0]);
        assert!(matches!(
            result,
            Err(AnalysisError::LengthMismatch {
                field: "reform_net_income",
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = HouseholdArrays::new(vec![1.0], vec![1.0], vec![1.0], vec![-1.0]);
        assert!(matches!(result, Err(AnalysisError::InvalidWeight { index: 0, .. })));

        let result = HouseholdArrays::new(vec![1.0], vec![1.0], vec![1.0], vec![f64::NAN]);
        assert!(matches!(result, Err(AnalysisError::InvalidWeight { .. })));
    }

    #[test]
    fn test_records_round_trip_deciles() {
        let arrays =
            HouseholdArrays::new(vec![10.0], vec![12.0], vec![3.0000001], vec![4.0]).unwrap();
        let r = arrays.records().next().unwrap();
        assert_eq!(r.income_decile, 3);
        assert_eq!(r.change(), 2.0);
    }

    #[test]
    fn test_non_finite_income_rejected() {
        let result = HouseholdArrays::new(vec![1.0, f64::NAN], vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidIncome { field: "baseline_net_income", index: 1, .. })
        ));

        let result = HouseholdArrays::new(vec![1.0], vec![f64::INFINITY], vec![1.0], vec![1.0]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidIncome { field: "reform_net_income", index: 0, .. })
        ));
    }

    #[test]
    fn test_from_records_validates_weights() {
        let mut bad = record(1_000.0, 1_100.0);
        bad.weight = -5.0;
        let result = HouseholdArrays::from_records(vec![bad, record(1_000.0, 1_000.0)]);
        assert!(matches!(result, Err(AnalysisError::InvalidWeight { index: 0, .. })));

        bad.weight = f64::NAN;
        assert!(HouseholdArrays::from_records(vec![bad]).is_err());

        let arrays = HouseholdArrays::from_records(vec![record(1_000.0, 1_100.0)]).unwrap();
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays.records().next().unwrap().income_decile, 1);
    }
}
