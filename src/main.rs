use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::{CsvWriter, SerWriter};
use tracing::info;
use tracing_subscriber::EnvFilter;

use farscope::plot::{self, MapOutcome};
use farscope::{files, summary};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarize and map yearly traffic-fatality report files"
)]
struct Cli {
    /// Directory holding the accident_<year>.csv.bz2 report files.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the report years available in the data directory.
    Years,
    /// Tabulate monthly accident counts for the given years.
    Summary {
        /// Years to aggregate, e.g. 2013 2014 2015.
        #[arg(required = true)]
        years: Vec<i32>,
        /// Also write the table to this CSV file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the accident locations of one state as a scatter map.
    Map {
        /// Numeric state code, e.g. 1 for Alabama.
        #[arg(long)]
        state: i64,
        #[arg(long)]
        year: i32,
        /// Output PNG path.
        #[arg(long, default_value = "accident_map.png")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    // ─── init logging ────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Years => {
            let years = files::available_years(&cli.data_dir)?;
            if years.is_empty() {
                info!("no report files found in {}", cli.data_dir.display());
            }
            for year in years {
                println!("{year}");
            }
        }

        Command::Summary { years, output } => {
            let mut df = summary::monthly_counts(&cli.data_dir, &years)?;
            println!("{df}");
            if let Some(path) = output {
                let mut file =
                    File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                CsvWriter::new(&mut file)
                    .finish(&mut df)
                    .context("writing summary CSV")?;
                info!("wrote summary to {}", path.display());
            }
        }

        Command::Map { state, year, out } => {
            match plot::render_state_map(&cli.data_dir, state, year, &out)? {
                MapOutcome::Rendered { path, points } => {
                    info!(points, "wrote map to {}", path.display());
                }
                MapOutcome::NoAccidents => println!("no accidents to plot"),
            }
        }
    }

    Ok(())
}
