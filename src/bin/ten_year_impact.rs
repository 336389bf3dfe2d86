//! Ten-year budget impact (2026-2035)
//!
//! Projects the base-year cost forward at a growth rate, or with
//! `--simulate` runs the microsimulation for every year in the window.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use stronger_start::microsim::source::{DEFAULT_DATASET, DEFAULT_MICRODATA_PATH};
use stronger_start::ten_year::{
    calculate_ten_year_impact, format_impact_table, simulate_yearly_costs, TenYearConfig,
};
use stronger_start::{stronger_start_reform, CsvMicrodata};

#[derive(Parser)]
#[command(about = "Ten-year federal cost of the Stronger Start reform")]
struct Args {
    /// First-year cost in millions
    #[arg(long, default_value_t = 1593.0)]
    base_cost: f64,

    /// Annual growth rate applied after the first year
    #[arg(long, default_value_t = 0.02)]
    growth: f64,

    /// Simulate every year instead of projecting from the base year
    #[arg(long)]
    simulate: bool,

    #[arg(long, default_value = DEFAULT_MICRODATA_PATH)]
    data_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_DATASET)]
    dataset: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = TenYearConfig {
        base_year_cost_millions: args.base_cost,
        annual_growth_rate: args.growth,
        ..Default::default()
    };

    println!("{}", "=".repeat(60));
    println!("Stronger Start for Working Families Act");
    println!("10-Year Budget Impact ({}-{})", config.start_year, config.end_year);
    println!("{}", "=".repeat(60));
    println!();

    if args.simulate {
        let source = CsvMicrodata::new(&args.data_dir, &args.dataset);
        let reform = stronger_start_reform();
        let (yearly, total) =
            simulate_yearly_costs(&source, &reform, config.start_year..=config.end_year)
                .context("simulating yearly costs")?;

        println!("{}", format_impact_table(&yearly));
        println!();
        println!("Total 10-Year Cost: ${:.2} billion", total / 1000.0);
        return Ok(());
    }

    let (yearly, total) = calculate_ten_year_impact(&config);
    println!("{}", format_impact_table(&yearly));
    println!();
    println!("Total 10-Year Cost: ${:.2} billion", total / 1000.0);
    println!();
    println!("Notes:");
    println!("- Base year ({}) cost: ${:.0} million", config.start_year, config.base_year_cost_millions);
    println!("- Annual growth rate: {:.0}%", config.annual_growth_rate * 100.0);
    println!();

    println!("{}", "-".repeat(60));
    println!("Sensitivity Analysis:");
    println!("{}", "-".repeat(60));
    for (name, rate) in [("0% growth", 0.0), ("2% growth", 0.02), ("3% growth", 0.03)] {
        let (_, total) = calculate_ten_year_impact(&config.clone().with_growth(rate));
        println!("  {}: ${:.2} billion over 10 years", name, total / 1000.0);
    }

    Ok(())
}
