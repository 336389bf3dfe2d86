//! Ten-year federal cost of the reform (2026-2035 budget window)

use crate::error::Result;
use crate::microsim::{calculate_yearly_cost, SimulationSource};
use crate::reform::Reform;
use serde::Serialize;

/// Cost in one year of the budget window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyImpact {
    pub year: i32,
    pub cost_millions: f64,
    pub cumulative_cost_millions: f64,
}

/// Growth-based projection parameters
#[derive(Debug, Clone)]
pub struct TenYearConfig {
    /// First-year cost from the microsimulation
    pub base_year_cost_millions: f64,
    pub start_year: i32,
    pub end_year: i32,
    /// Population and wage growth applied to years after the first
    pub annual_growth_rate: f64,
}

impl Default for TenYearConfig {
    fn default() -> Self {
        Self {
            base_year_cost_millions: 1593.0,
            start_year: 2026,
            end_year: 2035,
            annual_growth_rate: 0.02,
        }
    }
}

impl TenYearConfig {
    pub fn with_growth(mut self, annual_growth_rate: f64) -> Self {
        self.annual_growth_rate = annual_growth_rate;
        self
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Project the first-year cost across the window at a constant growth rate
///
/// Returns the yearly rows and the window total, all rounded to $0.1M.
pub fn calculate_ten_year_impact(config: &TenYearConfig) -> (Vec<YearlyImpact>, f64) {
    let mut yearly = Vec::new();
    let mut cumulative = 0.0;

    for (i, year) in (config.start_year..=config.end_year).enumerate() {
        let year_cost = config.base_year_cost_millions * (1.0 + config.annual_growth_rate).powi(i as i32);
        cumulative += year_cost;

        yearly.push(YearlyImpact {
            year,
            cost_millions: round1(year_cost),
            cumulative_cost_millions: round1(cumulative),
        });
    }

    (yearly, round1(cumulative))
}

/// Run the engine once per year instead of projecting from a base year
pub fn simulate_yearly_costs(
    source: &dyn SimulationSource,
    reform: &Reform,
    years: impl IntoIterator<Item = i32>,
) -> Result<(Vec<YearlyImpact>, f64)> {
    let mut yearly = Vec::new();
    let mut cumulative = 0.0;

    for year in years {
        let cost = calculate_yearly_cost(source, reform, year)?;
        cumulative += cost;
        yearly.push(YearlyImpact {
            year,
            cost_millions: round1(cost),
            cumulative_cost_millions: round1(cumulative),
        });
    }

    Ok((yearly, round1(cumulative)))
}

/// Format a number with comma thousands separators and fixed decimals
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Markdown table of annual and cumulative cost
pub fn format_impact_table(yearly: &[YearlyImpact]) -> String {
    let mut lines = vec![
        "| Year | Annual Cost ($ millions) | Cumulative Cost ($ millions) |".to_string(),
        "|------|--------------------------|------------------------------|".to_string(),
    ];

    for impact in yearly {
        lines.push(format!(
            "| {} | {} | {} |",
            impact.year,
            format_thousands(impact.cost_millions, 1),
            format_thousands(impact.cumulative_cost_millions, 1)
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microsim::{InMemorySource, Variable};
    use crate::reform::stronger_start_reform;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_window() {
        let (yearly, total) = calculate_ten_year_impact(&TenYearConfig::default());
        assert_eq!(yearly.len(), 10);
        assert_eq!(yearly[0].year, 2026);
        assert_eq!(yearly[9].year, 2035);
        assert_abs_diff_eq!(yearly[0].cost_millions, 1593.0);
        assert_abs_diff_eq!(yearly[1].cost_millions, 1624.9);
        assert_abs_diff_eq!(yearly[1].cumulative_cost_millions, 3217.9);
        // 1593 * (1.02^10 - 1) / 0.02
        assert_abs_diff_eq!(total, 17442.9, epsilon = 0.05);
        assert_eq!(yearly[9].cumulative_cost_millions, total);
    }

    #[test]
    fn test_zero_growth() {
        let config = TenYearConfig::default().with_growth(0.0);
        let (yearly, total) = calculate_ten_year_impact(&config);
        assert!(yearly.iter().all(|y| y.cost_millions == 1593.0));
        assert_abs_diff_eq!(total, 15930.0);
    }

    #[test]
    fn test_empty_window() {
        let config = TenYearConfig {
            start_year: 2030,
            end_year: 2029,
            ..Default::default()
        };
        let (yearly, total) = calculate_ten_year_impact(&config);
        assert!(yearly.is_empty());
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1593.0, 1), "1,593.0");
        assert_eq!(format_thousands(17442.94, 1), "17,442.9");
        assert_eq!(format_thousands(999.95, 0), "1,000");
        assert_eq!(format_thousands(12.0, 0), "12");
        assert_eq!(format_thousands(-1234567.0, 0), "-1,234,567");
        assert_eq!(format_thousands(-0.01, 1), "0.0");
    }

    #[test]
    fn test_format_table() {
        let (yearly, _) = calculate_ten_year_impact(&TenYearConfig::default());
        let table = format_impact_table(&yearly[..2]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "| 2026 | 1,593.0 | 1,593.0 |");
        assert_eq!(lines[3], "| 2027 | 1,624.9 | 3,217.9 |");
    }

    #[test]
    fn test_simulated_years() {
        let reform = stronger_start_reform();
        let mut source = InMemorySource::new("test");
        for (year, cost) in [(2026, 1_000_000.0), (2027, 2_000_000.0)] {
            source.insert("baseline", Variable::TaxUnitWeight, year, vec![1.0]);
            source.insert("baseline", Variable::IncomeTax, year, vec![0.0]);
            source.insert(&reform.name, Variable::IncomeTax, year, vec![-cost]);
        }

        let (yearly, total) = simulate_yearly_costs(&source, &reform, 2026..=2027).unwrap();
        assert_abs_diff_eq!(yearly[0].cost_millions, 1.0);
        assert_abs_diff_eq!(yearly[1].cumulative_cost_millions, 3.0);
        assert_abs_diff_eq!(total, 3.0);

        assert!(simulate_yearly_costs(&source, &reform, 2026..=2028).is_err());
    }
}
