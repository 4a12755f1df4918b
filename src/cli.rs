//! CLI argument definitions for labsift.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[command(
    name = "labsift",
    version,
    about = "Extract lab values from reports and flag them against reference ranges",
    long_about = "Extract hemoglobin, glucose, cholesterol, RBC and platelet values from\n\
                  free-text lab reports, normalize units to mg/dL and flag each value\n\
                  low/normal/high. Tabular CSV exports can be assessed row by row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse every report in a folder and write one JSON file per report.
    Reports(ReportsArgs),

    /// Assess each row of a CSV export of lab values.
    Table(TableArgs),
}

#[derive(Parser)]
pub struct ReportsArgs {
    /// Folder containing .txt (and, with PDF support, .pdf) reports.
    #[arg(value_name = "DIR")]
    pub reports_dir: PathBuf,

    /// Folder of guideline documents to learn reference ranges from.
    #[arg(long, value_name = "DIR")]
    pub guidelines: Option<PathBuf>,

    /// Where to write `<name>_parsed.json` files (default: ~/Labsift/reports).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON config file (default: $LABSIFT_CONFIG).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TableArgs {
    /// CSV file with one column per lab parameter.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Column holding the patient's sex.
    #[arg(long = "sex-column", value_name = "NAME")]
    pub sex_column: Option<String>,

    /// JSON config file (default: $LABSIFT_CONFIG).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
