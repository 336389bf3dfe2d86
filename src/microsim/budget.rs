//! Federal budget impact from tax-unit level simulation output

use super::source::{Scenario, SimulationSource, Variable};
use crate::error::{AnalysisError, Result};
use crate::reform::Reform;
use serde::Serialize;

/// Revenue and reach of a reform in one year
#[derive(Debug, Clone, Serialize)]
pub struct BudgetImpact {
    pub year: i32,
    pub dataset: String,
    pub baseline_revenue_billions: f64,
    pub reform_revenue_billions: f64,
    /// Reform minus baseline revenue; negative is a cost to government
    pub revenue_impact_millions: f64,
    pub cost_millions: f64,
    pub benefiting_tax_units: f64,
    pub total_tax_units: f64,
    pub pct_benefiting: f64,
}

fn weighted_sum(values: &[f64], weights: &[f64]) -> f64 {
    values.iter().zip(weights).map(|(v, w)| v * w).sum()
}

fn check_len(field: &'static str, expected: usize, values: &[f64]) -> Result<()> {
    if values.len() != expected {
        return Err(AnalysisError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Weighted federal income tax under baseline and reform for one year
fn income_tax_totals(
    source: &dyn SimulationSource,
    reform: &Reform,
    year: i32,
) -> Result<(f64, f64, Vec<f64>)> {
    if !reform.is_active(year) {
        log::warn!("Reform {} has no parameter overrides in force in {}", reform.name, year);
    }

    let weights = source.calculate(&Scenario::Baseline, Variable::TaxUnitWeight, year)?;
    let baseline_tax = source.calculate(&Scenario::Baseline, Variable::IncomeTax, year)?;
    let reform_tax = source.calculate(&Scenario::Reform(reform.clone()), Variable::IncomeTax, year)?;

    check_len("baseline income_tax", weights.len(), &baseline_tax)?;
    check_len("reform income_tax", weights.len(), &reform_tax)?;

    Ok((
        weighted_sum(&baseline_tax, &weights),
        weighted_sum(&reform_tax, &weights),
        weights,
    ))
}

/// Revenue impact and share of tax units with a larger refundable CTC
pub fn calculate_budget_impact(
    source: &dyn SimulationSource,
    reform: &Reform,
    year: i32,
) -> Result<BudgetImpact> {
    log::info!("Running baseline and reform simulations for {}", year);
    log::info!("Using dataset: {}", source.dataset_name());

    let (baseline_total, reform_total, weights) = income_tax_totals(source, reform, year)?;
    let revenue_impact = reform_total - baseline_total;

    let baseline_ctc = source.calculate(&Scenario::Baseline, Variable::RefundableCtc, year)?;
    let reform_ctc = source.calculate(&Scenario::Reform(reform.clone()), Variable::RefundableCtc, year)?;
    check_len("baseline refundable_ctc", weights.len(), &baseline_ctc)?;
    check_len("reform refundable_ctc", weights.len(), &reform_ctc)?;

    let beneficiaries: f64 = baseline_ctc
        .iter()
        .zip(&reform_ctc)
        .zip(&weights)
        .filter(|((b, r), _)| *r - *b > 0.0)
        .map(|(_, w)| w)
        .sum();
    let total_tax_units: f64 = weights.iter().sum();
    let pct_benefiting = if total_tax_units > 0.0 {
        beneficiaries / total_tax_units * 100.0
    } else {
        0.0
    };

    Ok(BudgetImpact {
        year,
        dataset: source.dataset_name().to_string(),
        baseline_revenue_billions: baseline_total / 1e9,
        reform_revenue_billions: reform_total / 1e9,
        revenue_impact_millions: revenue_impact / 1e6,
        cost_millions: -revenue_impact / 1e6,
        benefiting_tax_units: beneficiaries,
        total_tax_units,
        pct_benefiting,
    })
}

/// Cost of the reform in one year, in millions (positive = cost)
pub fn calculate_yearly_cost(source: &dyn SimulationSource, reform: &Reform, year: i32) -> Result<f64> {
    let (baseline_total, reform_total, _) = income_tax_totals(source, reform, year)?;
    let cost_millions = -(reform_total - baseline_total) / 1e6;
    log::info!("Simulated {}: ${:.0}M", year, cost_millions);
    Ok(cost_millions)
}
