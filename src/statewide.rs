//! Precomputed distributional snapshots and the live/precomputed seam
//!
//! A snapshot is a versioned JSON fixture recording the output of an
//! earlier simulation run. Report code asks an [`ImpactSource`] for decile
//! impacts and does not care whether they are read from a snapshot or
//! computed from microdata.

use crate::error::{AnalysisError, Result};
use crate::microsim::{calculate_decile_impacts_from_source, DecileImpacts, OutcomeShares, SimulationSource};
use crate::reform::Reform;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default location of the snapshot fixture
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/fixtures/statewide_2026.json";

/// Headline statistics published alongside the decile tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyStatistics {
    /// Negative = cost to government
    pub revenue_impact_millions: f64,
    pub percent_benefiting: f64,
    pub child_poverty_impact_pct: f64,
    pub deep_child_poverty_impact_pct: f64,
    pub gini_impact_pct: f64,
    pub avg_benefit_per_household: f64,
}

/// Decile tables and statistics captured from one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatewideSnapshot {
    /// Fixture version, bumped whenever the numbers are regenerated
    pub version: String,

    /// Where the numbers came from (report URL or run description)
    pub source: String,

    pub year: i32,

    #[serde(flatten)]
    pub impacts: DecileImpacts,

    pub key_statistics: KeyStatistics,
}

impl StatewideSnapshot {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let snapshot: StatewideSnapshot = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        log::info!("Loading snapshot from {}", path.as_ref().display());
        Self::from_reader(BufReader::new(file))
    }

    /// Check table shapes and that populated rows sum to 100%
    pub fn validate(&self) -> Result<()> {
        if self.impacts.decile_outcomes.len() != 10 {
            return Err(AnalysisError::InvalidSnapshot(format!(
                "expected 10 decile outcome rows, found {}",
                self.impacts.decile_outcomes.len()
            )));
        }
        if self.impacts.avg_impact_by_decile.len() != 10 {
            return Err(AnalysisError::InvalidSnapshot(format!(
                "expected 10 average impacts, found {}",
                self.impacts.avg_impact_by_decile.len()
            )));
        }

        let rows = self
            .impacts
            .decile_outcomes
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("decile {}", i + 1), s))
            .chain(std::iter::once(("all".to_string(), &self.impacts.all_outcomes)));

        for (label, shares) in rows {
            check_row(&label, shares)?;
        }
        Ok(())
    }
}

/// Five independently rounded shares can drift 0.25 from 100
const ROW_TOLERANCE: f64 = 0.25 + 1e-9;

fn check_row(label: &str, shares: &OutcomeShares) -> Result<()> {
    let total = shares.total();
    if total != 0.0 && (total - 100.0).abs() > ROW_TOLERANCE {
        return Err(AnalysisError::InvalidSnapshot(format!(
            "{} shares sum to {:.1}%",
            label, total
        )));
    }
    Ok(())
}

/// Anything that can supply decile impacts for a year
pub trait ImpactSource {
    fn decile_impacts(&self, year: i32) -> Result<DecileImpacts>;

    /// Short description for logs
    fn describe(&self) -> String;
}

impl ImpactSource for StatewideSnapshot {
    fn decile_impacts(&self, year: i32) -> Result<DecileImpacts> {
        if year != self.year {
            log::warn!(
                "Snapshot {} covers {}, requested {}",
                self.version,
                self.year,
                year
            );
        }
        Ok(self.impacts.clone())
    }

    fn describe(&self) -> String {
        format!("snapshot {} ({})", self.version, self.source)
    }
}

/// Decile impacts computed on demand from a simulation source
pub struct LiveImpacts<'a> {
    source: &'a dyn SimulationSource,
    reform: Reform,
}

impl<'a> LiveImpacts<'a> {
    pub fn new(source: &'a dyn SimulationSource, reform: Reform) -> Self {
        Self { source, reform }
    }
}

impl ImpactSource for LiveImpacts<'_> {
    fn decile_impacts(&self, year: i32) -> Result<DecileImpacts> {
        calculate_decile_impacts_from_source(self.source, &self.reform, year)
    }

    fn describe(&self) -> String {
        format!("live microsimulation on {}", self.source.dataset_name())
    }
}
