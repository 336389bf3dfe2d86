//! Stronger Start - distributional analysis of eliminating the refundable
//! Child Tax Credit earnings threshold
//!
//! This library provides:
//! - Household benefit curves for the phase-in change
//! - Weighted decile aggregation of microsimulation output
//! - Federal budget impact, single-year and over the ten-year window
//! - Plotly chart specifications and standalone HTML chart pages

pub mod error;
pub mod household;
pub mod reform;
pub mod microsim;
pub mod statewide;
pub mod ten_year;
pub mod charts;
pub mod report;

// Re-export commonly used types
pub use error::{AnalysisError, Result};
pub use household::{CtcPhaseIn, HouseholdShape, IncomeSeries};
pub use reform::{stronger_start_reform, Reform};
pub use microsim::{CsvMicrodata, DecileImpacts, HouseholdArrays, OutcomeBucket, SimulationSource};
pub use statewide::{ImpactSource, LiveImpacts, StatewideSnapshot};
pub use report::ReportGenerator;
