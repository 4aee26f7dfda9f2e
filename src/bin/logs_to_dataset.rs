//! Chat-log conversion binary.
//!
//! Reads JSON-lines Telegram logs and writes one message per line, ready to
//! be encoded or fed to `build_dictionary`.

use byteseq::data::logs::{convert_logs, write_dataset};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "byteseq-logs-to-dataset",
    about = "Convert JSON-lines chat logs into a plain-text dataset"
)]
struct Args {
    /// Comma-separated list of JSON-lines log files
    #[arg(long = "in", default_value = "./log.jsonl", value_delimiter = ',')]
    inputs: Vec<PathBuf>,

    /// Dataset output file
    #[arg(long, default_value = "./dataset.txt")]
    out: PathBuf,
}

fn main() -> ExitCode {
    byteseq::telemetry::init_tracing();
    let args = Args::parse();

    let report = convert_logs(&args.inputs);
    info!(
        files = args.inputs.len(),
        failed = report.failed.len(),
        messages = report.messages.len(),
        "converted logs"
    );

    if let Err(e) = write_dataset(&args.out, &report.messages) {
        error!(error = %e, "failed to write dataset");
        return ExitCode::FAILURE;
    }

    info!(out = %args.out.display(), "finished converting logs");
    ExitCode::SUCCESS
}
