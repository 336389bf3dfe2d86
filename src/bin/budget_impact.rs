//! Single-year budget impact of the reform from microsimulation exports

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use stronger_start::microsim::calculate_budget_impact;
use stronger_start::microsim::source::{DEFAULT_DATASET, DEFAULT_MICRODATA_PATH};
use stronger_start::{stronger_start_reform, CsvMicrodata};

#[derive(Parser)]
#[command(about = "Revenue impact and share of tax units benefiting")]
struct Args {
    #[arg(long, default_value = DEFAULT_MICRODATA_PATH)]
    data_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_DATASET)]
    dataset: String,

    #[arg(long, default_value_t = 2026)]
    year: i32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{}", "=".repeat(60));
    println!("Stronger Start for Working Families Act");
    println!("Budget Impact Simulation ({})", args.dataset);
    println!("{}", "=".repeat(60));

    let source = CsvMicrodata::new(&args.data_dir, &args.dataset);
    let reform = stronger_start_reform();
    let results = calculate_budget_impact(&source, &reform, args.year)
        .with_context(|| format!("budget impact for {}", args.year))?;

    println!();
    println!("{}", "-".repeat(60));
    println!("Results:");
    println!("{}", "-".repeat(60));
    println!("Year: {}", results.year);
    println!("Dataset: {}", results.dataset);
    println!();
    println!("Baseline Federal Revenue: ${:.2} billion", results.baseline_revenue_billions);
    println!("Reform Federal Revenue: ${:.2} billion", results.reform_revenue_billions);
    println!();
    println!("Revenue Impact: ${:.1} million", results.revenue_impact_millions);
    println!("Cost to Government: ${:.1} million", results.cost_millions);
    println!();
    println!("Benefiting Tax Units: {:.0}", results.benefiting_tax_units);
    println!("Percent of Tax Units Benefiting: {:.2}%", results.pct_benefiting);
    println!();
    println!("{}", "-".repeat(60));
    println!("Base-year cost for ten_year_impact: --base-cost {:.0}", results.cost_millions);
    println!("{}", "-".repeat(60));

    Ok(())
}
