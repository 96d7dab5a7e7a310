use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// esgboard - sustainability metrics and office-location ETL
#[derive(Parser, Debug)]
#[command(name = "esgboard")]
#[command(about = "Fold ESG metric and office CSVs into typed records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Optional TOML config file for geocoder settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and aggregate a metrics CSV
    Metrics(MetricsArgs),

    /// Parse an office-locations CSV
    Offices(OfficesArgs),

    /// Parse an office CSV and resolve coordinates through the geocoder
    Geocode(GeocodeArgs),
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Path to the metrics CSV
    pub source: PathBuf,

    /// Write the aggregated records as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct OfficesArgs {
    /// Path to the office-locations CSV
    pub source: PathBuf,

    /// Write the office records as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GeocodeArgs {
    /// Path to the office-locations CSV
    pub source: PathBuf,

    /// Geocode cache location (overrides config)
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Write the resolved office records as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,
}
