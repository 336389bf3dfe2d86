//! Microsimulation engine as a capability
//!
//! The engine itself is external. Anything that can hand back weighted
//! arrays for a named variable under baseline or reform configuration
//! implements [`SimulationSource`]. [`CsvMicrodata`] reads arrays exported
//! from the engine; [`InMemorySource`] holds arrays registered in code.

use crate::error::{AnalysisError, Result};
use crate::reform::{EngineParameters, Reform};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default root of exported engine arrays
pub const DEFAULT_MICRODATA_PATH: &str = "data/microdata";

/// Default dataset name (the engine's enhanced CPS)
pub const DEFAULT_DATASET: &str = "enhanced_cps_2024";

/// Policy configuration a simulation runs under
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    Baseline,
    Reform(Reform),
}

impl Scenario {
    /// File and log label: "baseline" or the reform name
    pub fn label(&self) -> &str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Reform(reform) => &reform.name,
        }
    }
}

/// Unit of analysis a variable is defined on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Household,
    TaxUnit,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Household => "household",
            Entity::TaxUnit => "tax_unit",
        }
    }
}

/// Engine variables consumed by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    HouseholdNetIncome,
    HouseholdWeight,
    HouseholdIncomeDecile,
    IncomeTax,
    TaxUnitWeight,
    RefundableCtc,
}

impl Variable {
    /// Engine variable name, also the CSV column header
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::HouseholdNetIncome => "household_net_income",
            Variable::HouseholdWeight => "household_weight",
            Variable::HouseholdIncomeDecile => "household_income_decile",
            Variable::IncomeTax => "income_tax",
            Variable::TaxUnitWeight => "tax_unit_weight",
            Variable::RefundableCtc => "refundable_ctc",
        }
    }

    pub fn entity(&self) -> Entity {
        match self {
            Variable::HouseholdNetIncome
            | Variable::HouseholdWeight
            | Variable::HouseholdIncomeDecile => Entity::Household,
            Variable::IncomeTax | Variable::TaxUnitWeight | Variable::RefundableCtc => {
                Entity::TaxUnit
            }
        }
    }
}

/// Provider of weighted per-unit arrays for a dataset
pub trait SimulationSource {
    /// Name of the underlying dataset
    fn dataset_name(&self) -> &str;

    /// One value per simulated unit for `variable` in `year`
    fn calculate(&self, scenario: &Scenario, variable: Variable, year: i32) -> Result<Vec<f64>>;
}

/// Arrays exported from the engine as CSV
///
/// Layout: `<root>/<dataset>/<year>/<scenario>_<entity>.csv`, one column per
/// variable named as in [`Variable::as_str`].
#[derive(Debug, Clone)]
pub struct CsvMicrodata {
    root: PathBuf,
    dataset: String,
}

impl CsvMicrodata {
    pub fn new(root: impl Into<PathBuf>, dataset: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            dataset: dataset.into(),
        }
    }

    fn year_dir(&self, year: i32) -> PathBuf {
        self.root.join(&self.dataset).join(year.to_string())
    }

    /// Path of the export holding `variable` under `scenario`
    pub fn file_path(&self, scenario: &Scenario, variable: Variable, year: i32) -> PathBuf {
        self.year_dir(year)
            .join(format!("{}_{}.csv", scenario.label(), variable.entity().as_str()))
    }

    /// Parameter file written next to a reform export: `<reform>_reform.json`
    pub fn reform_parameters_path(&self, reform: &Reform, year: i32) -> PathBuf {
        self.year_dir(year).join(format!("{}_reform.json", reform.name))
    }

    /// Check the reform against the parameters the export was run with
    ///
    /// Exports without a parameter file are accepted unchecked.
    pub fn check_reform_parameters(&self, reform: &Reform, year: i32) -> Result<()> {
        let path = self.reform_parameters_path(reform, year);
        if !path.exists() {
            log::debug!("No recorded parameters at {}", path.display());
            return Ok(());
        }

        let recorded: EngineParameters = serde_json::from_reader(File::open(&path)?)?;
        if recorded != reform.engine_parameters() {
            return Err(AnalysisError::ReformMismatch {
                reform: reform.name.clone(),
                path: path.display().to_string(),
            });
        }
        Ok(())
    }

    fn read_column(path: &Path, column: &str) -> Result<Option<Vec<f64>>> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let idx = match reader.headers()?.iter().position(|h| h.trim() == column) {
            Some(idx) => idx,
            None => return Ok(None),
        };

        let mut values = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let raw = record.get(idx).unwrap_or("").trim();
            let value: f64 = raw.parse().map_err(|_| {
                AnalysisError::Simulation(format!(
                    "{}: row {} has non-numeric {} value `{}`",
                    path.display(),
                    row + 1,
                    column,
                    raw
                ))
            })?;
            values.push(value);
        }

        Ok(Some(values))
    }
}

impl SimulationSource for CsvMicrodata {
    fn dataset_name(&self) -> &str {
        &self.dataset
    }

    fn calculate(&self, scenario: &Scenario, variable: Variable, year: i32) -> Result<Vec<f64>> {
        if let Scenario::Reform(reform) = scenario {
            self.check_reform_parameters(reform, year)?;
        }

        let path = self.file_path(scenario, variable, year);
        log::debug!("Reading {} from {}", variable.as_str(), path.display());

        Self::read_column(&path, variable.as_str())?.ok_or_else(|| AnalysisError::MissingVariable {
            variable: variable.as_str().to_string(),
            scenario: scenario.label().to_string(),
            year,
        })
    }
}

/// Arrays held in memory, keyed by scenario label, variable and year
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: String,
    arrays: HashMap<(String, Variable, i32), Vec<f64>>,
}

impl InMemorySource {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            arrays: HashMap::new(),
        }
    }

    /// Register an array for a scenario label ("baseline" or a reform name)
    pub fn insert(&mut self, scenario: &str, variable: Variable, year: i32, values: Vec<f64>) {
        self.arrays
            .insert((scenario.to_string(), variable, year), values);
    }

    /// Builder form of [`InMemorySource::insert`]
    pub fn with(mut self, scenario: &str, variable: Variable, year: i32, values: Vec<f64>) -> Self {
        self.insert(scenario, variable, year, values);
        self
    }
}

impl SimulationSource for InMemorySource {
    fn dataset_name(&self) -> &str {
        &self.dataset
    }

    fn calculate(&self, scenario: &Scenario, variable: Variable, year: i32) -> Result<Vec<f64>> {
        self.arrays
            .get(&(scenario.label().to_string(), variable, year))
            .cloned()
            .ok_or_else(|| AnalysisError::MissingVariable {
                variable: variable.as_str().to_string(),
                scenario: scenario.label().to_string(),
                year,
            })
    }
}
