//! Stronger Start chart generator
//!
//! Writes the blog post chart pages into output/charts/

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stronger_start::microsim::source::{DEFAULT_DATASET, DEFAULT_MICRODATA_PATH};
use stronger_start::statewide::DEFAULT_SNAPSHOT_PATH;
use stronger_start::{
    stronger_start_reform, CsvMicrodata, ImpactSource, LiveImpacts, ReportGenerator,
    StatewideSnapshot,
};

const DEPLOY_BASE_URL: &str = "https://policyengine.github.io/stronger-start-calc";

#[derive(Parser)]
#[command(name = "stronger_start", version, about = "Generate Stronger Start chart pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Charts from the precomputed statewide snapshot
    Static {
        /// Snapshot fixture to read decile tables from
        #[arg(long, default_value = DEFAULT_SNAPSHOT_PATH)]
        snapshot: PathBuf,
    },
    /// Charts from microsimulation exports
    Dynamic {
        /// Root directory of exported engine arrays
        #[arg(long, default_value = DEFAULT_MICRODATA_PATH)]
        data_dir: PathBuf,

        #[arg(long, default_value = DEFAULT_DATASET)]
        dataset: String,

        #[arg(long, default_value_t = 2026)]
        year: i32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let generator = ReportGenerator::new();

    let written = match cli.command {
        Command::Static { snapshot } => {
            println!("Generating charts for Stronger Start for Working Families Act...");
            let snapshot = StatewideSnapshot::from_json_path(&snapshot)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            generator.generate_static(&snapshot)?
        }
        Command::Dynamic {
            data_dir,
            dataset,
            year,
        } => {
            println!("{}", "=".repeat(60));
            println!("Generating DYNAMIC charts for Stronger Start for Working Families Act");
            println!("{}", "=".repeat(60));

            let reform = stronger_start_reform();
            log::info!("Reform parameters: {}", reform.to_engine_json());

            let source = CsvMicrodata::new(&data_dir, &dataset);
            let live = LiveImpacts::new(&source, reform);
            println!("Step 1: Running {}...", live.describe());
            let impacts = live
                .decile_impacts(year)
                .with_context(|| format!("microsimulation on {} for {}", dataset, year))?;

            println!("Step 2: Generating charts...");
            generator.generate_dynamic(&impacts)?
        }
    };

    println!();
    println!("Done! Charts generated in {}/", generator.output_dir().display());
    println!();
    println!("Chart URLs after deployment:");
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("  {}/{}", DEPLOY_BASE_URL, name.to_string_lossy());
        }
    }

    Ok(())
}
