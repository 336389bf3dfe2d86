//! Household-level benefit calculations over an employment income axis

mod data;
mod series;
pub mod benefit;

pub use data::{FilingStatus, HouseholdShape};
pub use series::IncomeSeries;
pub use benefit::{
    calculate_baseline_reform_comparison, calculate_net_income_changes, BenefitCurve,
    Breakpoints, CreditComparison, CtcPhaseIn,
};
