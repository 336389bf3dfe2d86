//! Chart file generation for the blog post
//!
//! Two chart sets exist. The static set reads decile tables from a
//! precomputed snapshot; the dynamic set takes decile impacts from any
//! [`ImpactSource`](crate::statewide::ImpactSource), typically a live
//! microsimulation, and shows all three household sizes.

use crate::charts::html::{write_chart_html, CHARTS_DIR};
use crate::charts::{
    avg_benefit_by_decile_chart, baseline_reform_chart, net_income_change_chart,
    winners_by_decile_chart, Figure,
};
use crate::error::Result;
use crate::household::{
    calculate_baseline_reform_comparison, calculate_net_income_changes, HouseholdShape,
    IncomeSeries,
};
use crate::microsim::DecileImpacts;
use crate::statewide::StatewideSnapshot;
use std::path::{Path, PathBuf};

/// Name of the reform as it appears in titles
pub const REFORM_TITLE: &str = "Stronger Start for Working Families Act";

/// Refundable cap used in the phase-in comparison chart
pub const COMPARISON_CAP: f64 = 1_700.0;

/// Writes chart pages into a fixed output directory
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    /// Generator writing to `output/charts`
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from(CHARTS_DIR),
        }
    }

    /// Generator writing somewhere else (tests, previews)
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write(&self, figure: &Figure, page_title: &str, filename: &str) -> Result<PathBuf> {
        write_chart_html(
            &self.output_dir,
            figure,
            &format!("{} - {}", page_title, REFORM_TITLE),
            filename,
        )
    }

    /// Net income change for a two-child single parent plus the snapshot's
    /// decile charts
    pub fn generate_static(&self, snapshot: &StatewideSnapshot) -> Result<Vec<PathBuf>> {
        log::info!(
            "Generating static charts from snapshot {} ({})",
            snapshot.version,
            snapshot.source
        );
        let mut written = Vec::new();

        let curve = calculate_net_income_changes(
            &HouseholdShape::default(),
            &IncomeSeries::household_default(),
        );
        let fig = net_income_change_chart(
            &[curve],
            "Figure 1: Change in net income for a single parent with two children",
        );
        written.push(self.write(&fig, "Net Income Change", "net-income-change.html")?);

        let fig = winners_by_decile_chart(
            &snapshot.impacts,
            &format!("Figure 2: Winners of {} by income decile", REFORM_TITLE),
        );
        written.push(self.write(&fig, "Winners by Income Decile", "winners-by-decile.html")?);

        let fig = avg_benefit_by_decile_chart(
            &snapshot.impacts,
            &format!("Figure 3: Average benefit of {} by income decile", REFORM_TITLE),
        );
        written.push(self.write(
            &fig,
            "Average Benefit by Income Decile",
            "avg-benefit-by-decile.html",
        )?);

        Ok(written)
    }

    /// Phase-in comparison, three household sizes and decile charts
    pub fn generate_dynamic(&self, impacts: &DecileImpacts) -> Result<Vec<PathBuf>> {
        log::info!("Generating dynamic charts");
        let mut written = Vec::new();

        let comparison =
            calculate_baseline_reform_comparison(&IncomeSeries::comparison_default(), COMPARISON_CAP);
        let fig = baseline_reform_chart(
            &comparison,
            "Figure 1: Refundable Child Tax Credit phase-in: Current law vs. reform",
        );
        written.push(self.write(
            &fig,
            "Baseline vs Reform (Dynamic)",
            "dynamic-baseline-reform-comparison.html",
        )?);

        let series = IncomeSeries::household_default();
        let curves: Vec<_> = (1..=3)
            .map(|n| calculate_net_income_changes(&HouseholdShape::single(n), &series))
            .collect();
        let fig = net_income_change_chart(
            &curves,
            &format!("Figure 2: Change in net income from the {}", REFORM_TITLE),
        );
        written.push(self.write(
            &fig,
            "Net Income Change (Dynamic)",
            "dynamic-net-income-change.html",
        )?);

        let fig = winners_by_decile_chart(
            impacts,
            &format!("Figure 3: Winners of {} by income decile", REFORM_TITLE),
        );
        written.push(self.write(
            &fig,
            "Winners by Income Decile (Dynamic)",
            "dynamic-winners-by-decile.html",
        )?);

        let fig = avg_benefit_by_decile_chart(
            impacts,
            &format!("Figure 4: Average benefit of {} by income decile", REFORM_TITLE),
        );
        written.push(self.write(
            &fig,
            "Average Benefit by Income Decile (Dynamic)",
            "dynamic-avg-benefit-by-decile.html",
        )?);

        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microsim::OutcomeShares;
    use crate::statewide::KeyStatistics;
    use std::fs;

    fn impacts() -> DecileImpacts {
        let row = OutcomeShares {
            gain_less_than_5pct: 3.0,
            no_change: 97.0,
            ..Default::default()
        };
        DecileImpacts {
            decile_outcomes: vec![row; 10],
            all_outcomes: row,
            avg_impact_by_decile: vec![5.0; 10],
        }
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(ReportGenerator::default().output_dir(), Path::new("output/charts"));
    }

    #[test]
    fn test_static_charts_written() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = StatewideSnapshot {
            version: "test".to_string(),
            source: "unit test".to_string(),
            year: 2026,
            impacts: impacts(),
            key_statistics: KeyStatistics {
                revenue_impact_millions: -1.0,
                percent_benefiting: 3.0,
                child_poverty_impact_pct: 0.0,
                deep_child_poverty_impact_pct: 0.0,
                gini_impact_pct: 0.0,
                avg_benefit_per_household: 5.0,
            },
        };

        let written = ReportGenerator::with_output_dir(dir.path())
            .generate_static(&snapshot)
            .unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["net-income-change.html", "winners-by-decile.html", "avg-benefit-by-decile.html"]
        );

        let page = fs::read_to_string(&written[1]).unwrap();
        assert!(page.contains(
            "<title>Winners by Income Decile - Stronger Start for Working Families Act</title>"
        ));
    }

    #[test]
    fn test_dynamic_charts_written() {
        let dir = tempfile::tempdir().unwrap();
        let written = ReportGenerator::with_output_dir(dir.path())
            .generate_dynamic(&impacts())
            .unwrap();

        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.exists()));
        assert!(written[0].ends_with("dynamic-baseline-reform-comparison.html"));
        assert!(written[3].ends_with("dynamic-avg-benefit-by-decile.html"));
    }
}
