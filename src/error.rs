//! Error type shared by the analysis library

use thiserror::Error;

/// Errors raised while building income series, reading simulation output,
/// or writing report files
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid income range: min={min}, max={max}, step={step}")]
    InvalidIncomeRange { min: u32, max: u32, step: u32 },

    #[error("array length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid weight {weight} at index {index}")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("non-finite {field} {value} at index {index}")]
    InvalidIncome {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("reform `{reform}` does not match the parameters recorded in {path}")]
    ReformMismatch { reform: String, path: String },

    #[error("variable `{variable}` not available for {scenario} in {year}")]
    MissingVariable {
        variable: String,
        scenario: String,
        year: i32,
    },

    #[error("invalid statewide snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("simulation failed: {0}")]
    Simulation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
