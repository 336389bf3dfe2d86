//! Print decile outcome tables from microsimulation exports or a snapshot

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use stronger_start::microsim::source::{DEFAULT_DATASET, DEFAULT_MICRODATA_PATH};
use stronger_start::microsim::{OutcomeBucket, DECILES};
use stronger_start::{stronger_start_reform, CsvMicrodata, ImpactSource, LiveImpacts, StatewideSnapshot};

#[derive(Parser)]
#[command(about = "Distributional impact of the reform by income decile")]
struct Args {
    /// Read a precomputed snapshot instead of running the microsimulation
    #[arg(long)]
    snapshot: Option<PathBuf>,

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

    let source = CsvMicrodata::new(&args.data_dir, &args.dataset);
    let impact_source: Box<dyn ImpactSource + '_> = match &args.snapshot {
        Some(path) => Box::new(
            StatewideSnapshot::from_json_path(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?,
        ),
        None => Box::new(LiveImpacts::new(&source, stronger_start_reform())),
    };

    println!("Decile impacts from {}", impact_source.describe());
    let impacts = impact_source
        .decile_impacts(args.year)
        .context("computing decile impacts")?;

    println!("\nDecile Outcomes (%):");
    println!("{}", "-".repeat(60));
    println!(
        "{:<8} {:<10} {:<10} {:<10} {:<10} {:<10}",
        "Decile", "Gain>5%", "Gain<5%", "No Change", "Loss<5%", "Loss>5%"
    );
    println!("{}", "-".repeat(60));
    for (decile, shares) in DECILES.iter().zip(&impacts.decile_outcomes) {
        print!("{:<8} ", decile);
        for bucket in OutcomeBucket::ALL {
            print!("{:<10.1} ", shares.get(bucket));
        }
        println!();
    }

    println!("\nOverall Population Outcomes (%):");
    println!("{}", "-".repeat(60));
    for bucket in OutcomeBucket::ALL {
        println!("  {}: {:.1}%", bucket.label(), impacts.all_outcomes.get(bucket));
    }

    println!("\nAverage Impact by Decile ($):");
    println!("{}", "-".repeat(60));
    for (decile, impact) in DECILES.iter().zip(&impacts.avg_impact_by_decile) {
        println!("  Decile {}: ${:.0}", decile, impact);
    }

    Ok(())
}
