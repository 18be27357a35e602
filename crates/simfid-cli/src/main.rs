//! simfid CLI
//!
//! Compares two CFD snapshot files and reports whether they agree within
//! tolerance.
//!
//! Usage: simfid-cli <FIRST> <SECOND> <FILE_TYPE> [--tolerance <T>]

use clap::{Parser, ValueEnum};
use simfid_core::logging_facility::{self, Profile};
use simfid_core::{render_failure, render_success};
use simfid_engine::{run_comparison, ComparisonRequest};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable logs
    Pretty,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "simfid-cli")]
#[command(about = "simfid - CFD snapshot fidelity comparison", long_about = None)]
struct Cli {
    /// Reference snapshot (file 1)
    first: PathBuf,

    /// Candidate snapshot (file 2)
    second: PathBuf,

    /// Snapshot format: vtu, pvtu, xdmf or xmf
    file_type: String,

    /// Comparison tolerance (default 1e-12)
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Directory containing HDF5 containers (default: each description's directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Maximum number of values read per array or dataset (0 disables the cap)
    #[arg(long)]
    max_elements: Option<usize>,

    /// Label recorded on the run's log events
    #[arg(long)]
    label: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Print the comparison report as JSON instead of the confirmation line
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn request(&self) -> ComparisonRequest {
        ComparisonRequest {
            first: self.first.clone(),
            second: self.second.clone(),
            format_tag: self.file_type.clone(),
            tolerance: self.tolerance,
            data_dir: self.data_dir.clone(),
            max_elements: self.max_elements,
            label: self.label.clone(),
        }
    }
}

fn execute(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match run_comparison(&cli.request()) {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_success(&report));
            }
            Ok(true)
        }
        Err(e) => {
            eprintln!("{}", render_failure(&e));
            Ok(false)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    match execute(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
