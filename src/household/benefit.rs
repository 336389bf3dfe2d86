//! Refundable Child Tax Credit phase-in under current law and the reform
//!
//! Current law phases the refundable credit in at 15% of earnings above
//! $2,500. The reform starts the phase-in at the first dollar, so a
//! household gains up to 15% of the eliminated $2,500 range ($375). The gain
//! disappears once current-law earnings are high enough to reach the
//! refundable cap:
//!
//! ```text
//!   375 |      ______________
//!       |     /              \
//!       |    /                \
//!     0 |___/                  \________
//!       0  2500     reform_cap  baseline_cap
//! ```

use super::{HouseholdShape, IncomeSeries};
use serde::Serialize;

/// Statutory phase-in parameters for the refundable CTC (2026 values)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CtcPhaseIn {
    /// Phase-in rate applied to earnings
    pub rate: f64,

    /// Current-law earnings threshold, eliminated by the reform
    pub threshold: f64,

    /// Maximum refundable amount per qualifying child
    pub cap_per_child: f64,
}

impl Default for CtcPhaseIn {
    fn default() -> Self {
        Self {
            rate: 0.15,
            threshold: 2_500.0,
            cap_per_child: 1_700.0,
        }
    }
}

/// Kinks of the net income change curve for one household size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoints {
    /// End of the linear ramp, equal to the eliminated threshold
    pub threshold: f64,

    /// Earnings at which the reform credit reaches the household cap
    pub reform_cap_income: f64,

    /// Earnings at which the current-law credit catches up
    pub baseline_cap_income: f64,

    /// Plateau value
    pub max_gap: f64,
}

impl CtcPhaseIn {
    /// Largest possible gain: the phase-in applied to the whole threshold
    pub fn max_gap(&self) -> f64 {
        self.threshold * self.rate
    }

    /// Breakpoints for a household with `num_children` qualifying children
    ///
    /// Cap incomes are rounded to whole dollars, giving the published
    /// $22,667 / $25,167 kinks for two children.
    pub fn breakpoints(&self, num_children: u8) -> Breakpoints {
        let cap_total = self.cap_per_child * num_children as f64;
        let reform_cap_income = (cap_total / self.rate).round();

        Breakpoints {
            threshold: self.threshold,
            reform_cap_income,
            baseline_cap_income: reform_cap_income + self.threshold,
            max_gap: self.max_gap(),
        }
    }

    /// Change in net income from the reform at a given employment income
    pub fn net_income_change(&self, income: f64, household: &HouseholdShape) -> f64 {
        if household.num_children == 0 {
            return 0.0;
        }

        let bp = self.breakpoints(household.num_children);

        if income <= 0.0 {
            0.0
        } else if income <= bp.threshold {
            income * self.rate
        } else if income <= bp.reform_cap_income {
            bp.max_gap
        } else if income <= bp.baseline_cap_income {
            bp.max_gap - (income - bp.reform_cap_income) * self.rate
        } else {
            0.0
        }
    }

    /// Current-law refundable credit: phases in above the threshold
    pub fn baseline_credit(&self, income: f64, cap_total: f64) -> f64 {
        ((income - self.threshold).max(0.0) * self.rate).min(cap_total)
    }

    /// Reform refundable credit: phases in from the first dollar
    pub fn reform_credit(&self, income: f64, cap_total: f64) -> f64 {
        (income.max(0.0) * self.rate).min(cap_total)
    }
}

/// Net income change aligned to an income series
#[derive(Debug, Clone, Serialize)]
pub struct BenefitCurve {
    pub household: HouseholdShape,
    pub incomes: IncomeSeries,
    pub changes: Vec<f64>,
}

impl BenefitCurve {
    /// Largest change along the curve
    pub fn peak(&self) -> f64 {
        self.changes.iter().copied().fold(0.0, f64::max)
    }
}

/// Refundable credit under both scenarios, aligned to an income series
#[derive(Debug, Clone, Serialize)]
pub struct CreditComparison {
    pub incomes: IncomeSeries,
    pub baseline_credits: Vec<f64>,
    pub reform_credits: Vec<f64>,
}

/// Evaluate the net income change for every income in the series
pub fn calculate_net_income_changes(
    household: &HouseholdShape,
    incomes: &IncomeSeries,
) -> BenefitCurve {
    let params = CtcPhaseIn::default();
    let changes = incomes
        .iter()
        .map(|income| params.net_income_change(income, household))
        .collect();

    BenefitCurve {
        household: *household,
        incomes: incomes.clone(),
        changes,
    }
}

/// Current-law and reform refundable credit along the series
///
/// The comparison uses a single household cap (`cap_total`, $1,700 for one
/// child) and is the same for every filing status.
pub fn calculate_baseline_reform_comparison(
    incomes: &IncomeSeries,
    cap_total: f64,
) -> CreditComparison {
    let params = CtcPhaseIn::default();
    let (baseline_credits, reform_credits) = incomes
        .iter()
        .map(|income| {
            (
                params.baseline_credit(income, cap_total),
                params.reform_credit(income, cap_total),
            )
        })
        .unzip();

    CreditComparison {
        incomes: incomes.clone(),
        baseline_credits,
        reform_credits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn change(income: f64, children: u8) -> f64 {
        CtcPhaseIn::default().net_income_change(income, &HouseholdShape::single(children))
    }

    #[test]
    fn test_two_children_scenarios() {
        assert_abs_diff_eq!(change(0.0, 2), 0.0);
        assert_abs_diff_eq!(change(2_500.0, 2), 375.0, epsilon = 1e-9);
        assert_abs_diff_eq!(change(22_667.0, 2), 375.0, epsilon = 1e-9);
        assert_abs_diff_eq!(change(25_167.0, 2), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(change(30_000.0, 2), 0.0);
    }

    #[test]
    fn test_two_children_breakpoints() {
        let bp = CtcPhaseIn::default().breakpoints(2);
        assert_abs_diff_eq!(bp.reform_cap_income, 22_667.0);
        assert_abs_diff_eq!(bp.baseline_cap_income, 25_167.0);
        assert_abs_diff_eq!(bp.max_gap, 375.0, epsilon = 1e-9);
    }

    #[test]
    fn test_endpoints_for_each_household_size() {
        let params = CtcPhaseIn::default();
        for n in 1..=3u8 {
            let bp = params.breakpoints(n);
            assert_abs_diff_eq!(change(0.0, n), 0.0);
            assert_abs_diff_eq!(
                change(params.threshold, n),
                params.threshold * params.rate,
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(change(params.threshold, n), bp.max_gap, epsilon = 1e-9);
            assert_abs_diff_eq!(change(bp.baseline_cap_income + 1.0, n), 0.0);
        }
    }

    #[test]
    fn test_continuity_at_breakpoints() {
        let params = CtcPhaseIn::default();
        let eps = 1e-6;
        for n in 1..=3u8 {
            let bp = params.breakpoints(n);
            for kink in [bp.threshold, bp.reform_cap_income, bp.baseline_cap_income] {
                let at = change(kink, n);
                assert_abs_diff_eq!(change(kink - eps, n), at, epsilon = 1e-4);
                assert_abs_diff_eq!(change(kink + eps, n), at, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_no_children_means_no_change() {
        assert_abs_diff_eq!(change(1_000.0, 0), 0.0);
        assert_abs_diff_eq!(change(10_000.0, 0), 0.0);
    }

    #[test]
    fn test_filing_status_does_not_matter() {
        let params = CtcPhaseIn::default();
        let single = HouseholdShape::single(2);
        let joint = HouseholdShape::new(crate::household::FilingStatus::Joint, 2);
        for income in [1_000.0, 12_000.0, 24_000.0] {
            assert_eq!(
                params.net_income_change(income, &single),
                params.net_income_change(income, &joint)
            );
        }
    }

    #[test]
    fn test_comparison_capped_at_twenty_thousand() {
        let params = CtcPhaseIn::default();
        assert_abs_diff_eq!(params.baseline_credit(20_000.0, 1_700.0), 1_700.0);
        assert_abs_diff_eq!(params.reform_credit(20_000.0, 1_700.0), 1_700.0);
    }

    #[test]
    fn test_comparison_below_threshold() {
        let params = CtcPhaseIn::default();
        assert_abs_diff_eq!(params.baseline_credit(2_000.0, 1_700.0), 0.0);
        assert_abs_diff_eq!(params.reform_credit(2_000.0, 1_700.0), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_comparison_is_aligned() {
        let series = IncomeSeries::comparison_default();
        let cmp = calculate_baseline_reform_comparison(&series, 1_700.0);
        assert_eq!(cmp.baseline_credits.len(), series.len());
        assert_eq!(cmp.reform_credits.len(), series.len());
        assert_abs_diff_eq!(*cmp.reform_credits.last().unwrap(), 1_700.0);
    }

    #[test]
    fn test_curve_peak() {
        let curve = calculate_net_income_changes(
            &HouseholdShape::default(),
            &IncomeSeries::household_default(),
        );
        assert_eq!(curve.changes.len(), curve.incomes.len());
        assert_abs_diff_eq!(curve.peak(), 375.0, epsilon = 1e-9);
        assert_abs_diff_eq!(*curve.changes.last().unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_reform_never_below_baseline(income in 0u32..100_000, cap in 0u32..10_000) {
            let params = CtcPhaseIn::default();
            let x = income as f64;
            let cap = cap as f64;
            prop_assert!(params.baseline_credit(x, cap) <= params.reform_credit(x, cap));
        }

        #[test]
        fn prop_change_matches_credit_difference(income in 0u32..60_000, n in 1u8..=3) {
            let params = CtcPhaseIn::default();
            let x = income as f64;
            let cap_total = params.cap_per_child * n as f64;
            let expected = params.reform_credit(x, cap_total) - params.baseline_credit(x, cap_total);
            let actual = params.net_income_change(x, &HouseholdShape::single(n));
            // Cap incomes are rounded to the dollar, so the curves differ by at most 0.15 * 0.5
            prop_assert!((actual - expected).abs() <= 0.076);
            prop_assert!((0.0..=params.max_gap() + 1e-9).contains(&actual));
        }
    }
}
