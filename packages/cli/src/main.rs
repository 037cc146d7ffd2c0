#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for crime hotspot analysis and urgency scoring.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crime_hotspot_analytics_models::ClusteringMode;
use crime_hotspot_cli::config::{FileConfig, HotspotOverrides};
use crime_hotspot_cli::snapshot::{self, SnapshotFormat};
use crime_hotspot_cli::{HotspotRequest, explain_scores, run_hotspots, run_score};
use crime_hotspot_crime_models::CrimeType;
use crime_hotspot_priority::base_points;

#[derive(Parser)]
#[command(name = "crime_hotspot", about = "Crime hotspot analysis and urgency scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster incidents into hotspots and print them as JSON
    Hotspots {
        /// Incident snapshot (`.json` or `.csv`)
        #[arg(long)]
        input: PathBuf,
        /// Snapshot format (defaults to the file extension)
        #[arg(long, value_enum)]
        format: Option<SnapshotFormat>,
        /// Only include incidents filed on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Only include incidents filed on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// Minimum incidents per hotspot (at least 2)
        #[arg(long)]
        min_cluster_size: Option<usize>,
        /// Cluster radius in kilometers
        #[arg(long)]
        radius_km: Option<f64>,
        /// Clustering mode: "anchor" (default) or "transitive"
        #[arg(long)]
        mode: Option<ClusteringMode>,
        /// TOML config file with a `[hotspots]` table
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Score every incident in a snapshot and print them as JSON
    Score {
        /// Incident snapshot (`.json` or `.csv`)
        #[arg(long)]
        input: PathBuf,
        /// Snapshot format (defaults to the file extension)
        #[arg(long, value_enum)]
        format: Option<SnapshotFormat>,
        /// Include the per-part score breakdown
        #[arg(long)]
        explain: bool,
    },
    /// Print the crime type severity table
    Severity,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Hotspots {
            input,
            format,
            start_date,
            end_date,
            min_cluster_size,
            radius_km,
            mode,
            config,
        } => {
            let file_config = match config {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            };
            let params = file_config.resolve(&HotspotOverrides {
                radius_km,
                min_cluster_size,
                mode,
            });

            let hotspots = run_hotspots(&HotspotRequest {
                input: &input,
                format,
                start_date: start_date.as_deref(),
                end_date: end_date.as_deref(),
                params,
            })?;

            println!("{}", serde_json::to_string_pretty(&hotspots)?);
        }
        Commands::Score {
            input,
            format,
            explain,
        } => {
            if explain {
                let incidents = snapshot::load_snapshot(&input, format)?;
                let explained = explain_scores(incidents);
                println!("{}", serde_json::to_string_pretty(&explained)?);
            } else {
                let incidents = run_score(&input, format)?;
                println!("{}", serde_json::to_string_pretty(&incidents)?);
            }
        }
        Commands::Severity => {
            println!("{:<22} {:>8} {:>6}", "CRIME TYPE", "SEVERITY", "BASE");
            for crime_type in CrimeType::all() {
                let label: &str = crime_type.as_ref();
                println!(
                    "{label:<22} {:>8} {:>6}",
                    crime_type.severity(),
                    base_points(*crime_type)
                );
            }
        }
    }

    Ok(())
}
