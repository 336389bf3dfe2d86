//! Equally spaced employment income axis

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Ordered income levels generated from `(min, max, step)`
///
/// `max` is included when it falls on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeSeries {
    values: Vec<u32>,
}

impl IncomeSeries {
    pub fn new(min: u32, max: u32, step: u32) -> Result<Self> {
        if step == 0 || min > max {
            return Err(AnalysisError::InvalidIncomeRange { min, max, step });
        }

        let values = (min..=max).step_by(step as usize).collect();
        Ok(Self { values })
    }

    /// $0 to $50,000 in $100 steps, the household chart axis
    pub fn household_default() -> Self {
        Self {
            values: (0..=50_000).step_by(100).collect(),
        }
    }

    /// $0 to $20,000 in $100 steps, the phase-in comparison axis
    pub fn comparison_default() -> Self {
        Self {
            values: (0..=20_000).step_by(100).collect(),
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|&v| v as f64)
    }
}
