//! Weighted decile aggregation of household outcomes

use super::records::{HouseholdArrays, OutcomeBucket};
use super::source::{Scenario, SimulationSource, Variable};
use crate::error::Result;
use crate::reform::Reform;
use serde::{Deserialize, Serialize};

/// Income deciles, 1 = lowest
pub const DECILES: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Weighted population share in each outcome bucket, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeShares {
    pub gain_more_than_5pct: f64,
    pub gain_less_than_5pct: f64,
    pub no_change: f64,
    pub loss_less_than_5pct: f64,
    pub loss_more_than_5pct: f64,
}

impl OutcomeShares {
    /// Shares from bucket weights; all zero when `total_weight` is zero
    ///
    /// Each share is rounded to one decimal on its own, so a populated row
    /// sums to 100 only up to rounding.
    pub fn from_weights(bucket_weights: &[f64; 5], total_weight: f64) -> Self {
        if total_weight <= 0.0 {
            return Self::default();
        }
        let share = |w: f64| (w / total_weight * 1_000.0).round() / 10.0;
        Self {
            gain_more_than_5pct: share(bucket_weights[0]),
            gain_less_than_5pct: share(bucket_weights[1]),
            no_change: share(bucket_weights[2]),
            loss_less_than_5pct: share(bucket_weights[3]),
            loss_more_than_5pct: share(bucket_weights[4]),
        }
    }

    pub fn get(&self, bucket: OutcomeBucket) -> f64 {
        match bucket {
            OutcomeBucket::GainMoreThan5Pct => self.gain_more_than_5pct,
            OutcomeBucket::GainLessThan5Pct => self.gain_less_than_5pct,
            OutcomeBucket::NoChange => self.no_change,
            OutcomeBucket::LoseLessThan5Pct => self.loss_less_than_5pct,
            OutcomeBucket::LoseMoreThan5Pct => self.loss_more_than_5pct,
        }
    }

    pub fn total(&self) -> f64 {
        OutcomeBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }

    /// Share of the population with any gain
    pub fn gaining(&self) -> f64 {
        self.gain_more_than_5pct + self.gain_less_than_5pct
    }
}

/// Distributional impact of a reform by income decile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecileImpacts {
    /// Outcome shares for deciles 1..=10
    pub decile_outcomes: Vec<OutcomeShares>,

    /// Outcome shares over all households
    pub all_outcomes: OutcomeShares,

    /// Weighted average dollar change per decile, rounded to the dollar
    pub avg_impact_by_decile: Vec<f64>,
}

impl DecileImpacts {
    /// Shares of one bucket across the ten deciles
    pub fn bucket_series(&self, bucket: OutcomeBucket) -> Vec<f64> {
        self.decile_outcomes.iter().map(|s| s.get(bucket)).collect()
    }
}

/// Aggregate household arrays into decile and population statistics
pub fn calculate_decile_impacts(arrays: &HouseholdArrays) -> Result<DecileImpacts> {
    let mut decile_weight = [0.0_f64; 10];
    let mut decile_change = [0.0_f64; 10];
    let mut decile_buckets = [[0.0_f64; 5]; 10];
    let mut all_buckets = [0.0_f64; 5];
    let mut total_weight = 0.0;

    let mut unassigned = 0usize;
    let mut max_pct_change = f64::NEG_INFINITY;
    let mut top_bucket_count = 0usize;

    for record in arrays.records() {
        let bucket = record.outcome().index();
        total_weight += record.weight;
        all_buckets[bucket] += record.weight;

        max_pct_change = max_pct_change.max(record.pct_change());
        if bucket == 0 {
            top_bucket_count += 1;
        }

        match record.decile_index() {
            Some(d) => {
                decile_weight[d] += record.weight;
                decile_change[d] += record.change() * record.weight;
                decile_buckets[d][bucket] += record.weight;
            }
            None => unassigned += 1,
        }
    }

    if unassigned > 0 {
        log::warn!(
            "{} households have no income decile; counted in population totals only",
            unassigned
        );
    }

    let avg_impact_by_decile = (0..10)
        .map(|d| {
            if decile_weight[d] > 0.0 {
                // Halves go to the even dollar
                (decile_change[d] / decile_weight[d]).round_ties_even()
            } else {
                0.0
            }
        })
        .collect();

    let decile_outcomes: Vec<OutcomeShares> = (0..10)
        .map(|d| OutcomeShares::from_weights(&decile_buckets[d], decile_weight[d]))
        .collect();

    let all_outcomes = OutcomeShares::from_weights(&all_buckets, total_weight);

    if !arrays.is_empty() {
        log::debug!("Max pct_change: {:.2}%", max_pct_change);
        log::debug!("Households with >5% gain: {}", top_bucket_count);
        log::debug!("Overall gain >5%: {}%", all_outcomes.gain_more_than_5pct);
        log::debug!(
            "Decile 1 gain >5%: {}% (weight {:.0})",
            decile_outcomes[0].gain_more_than_5pct,
            decile_weight[0]
        );
    }

    Ok(DecileImpacts {
        decile_outcomes,
        all_outcomes,
        avg_impact_by_decile,
    })
}

/// Run baseline and reform through the engine and aggregate by decile
///
/// Deciles and weights come from the baseline simulation.
pub fn calculate_decile_impacts_from_source(
    source: &dyn SimulationSource,
    reform: &Reform,
    year: i32,
) -> Result<DecileImpacts> {
    log::info!(
        "Running microsimulation for {} on {}",
        year,
        source.dataset_name()
    );
    if !reform.is_active(year) {
        log::warn!("Reform {} has no parameter overrides in force in {}", reform.name, year);
    }

    let baseline = Scenario::Baseline;
    let reformed = Scenario::Reform(reform.clone());

    let decile = source.calculate(&baseline, Variable::HouseholdIncomeDecile, year)?;
    let weight = source.calculate(&baseline, Variable::HouseholdWeight, year)?;
    let baseline_income = source.calculate(&baseline, Variable::HouseholdNetIncome, year)?;
    let reform_income = source.calculate(&reformed, Variable::HouseholdNetIncome, year)?;

    let arrays = HouseholdArrays::new(baseline_income, reform_income, decile, weight)?;
    log::info!("Aggregating {} households", arrays.len());

    calculate_decile_impacts(&arrays)
}
