//! labsift command line.

use clap::Parser;

mod cli;
mod driver;

use crate::cli::{Cli, Command};
use crate::driver::{run_reports, run_table};

fn main() {
    let cli = Cli::parse();
    let level = cli
        .verbosity
        .is_present()
        .then(|| cli.verbosity.tracing_level_filter());
    labsift_lib::init_tracing(level);

    let exit_code = match &cli.command {
        Command::Reports(args) => match run_reports(args) {
            Ok(summary) => {
                tracing::info!(
                    processed = summary.processed,
                    read_failures = summary.read_failures,
                    write_failures = summary.write_failures,
                    output_dir = %summary.output_dir.display(),
                    "Reports written"
                );
                if summary.read_failures + summary.write_failures > 0 { 2 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Table(args) => match run_table(args) {
            Ok(summary) => {
                tracing::info!(
                    rows = summary.rows,
                    rows_with_issues = summary.rows_with_issues,
                    "Table assessed"
                );
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
