//! Distributional and budget statistics from microsimulation output

mod records;
mod aggregate;
mod budget;
pub mod source;

pub use records::{HouseholdArrays, HouseholdRecord, OutcomeBucket};
pub use aggregate::{
    calculate_decile_impacts, calculate_decile_impacts_from_source, DecileImpacts,
    OutcomeShares, DECILES,
};
pub use budget::{calculate_budget_impact, calculate_yearly_cost, BudgetImpact};
pub use source::{CsvMicrodata, Entity, InMemorySource, Scenario, SimulationSource, Variable};
