//! Dictionary building binary.
//!
//! Ranks the words of a plain-text dataset by frequency and writes the top
//! entries, preceded by `<UNK>`, as `"{index} {word}"` lines.

use byteseq::data::dictionary::{Dictionary, DEFAULT_MAX_WORDS};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "byteseq-build-dictionary",
    about = "Build a frequency-ranked word dictionary from a text dataset"
)]
struct Args {
    /// Plain-text dataset, one message per line
    #[arg(long, default_value = "./dataset.txt")]
    dataset: PathBuf,

    /// Dictionary output file
    #[arg(long, default_value = "./out.txt")]
    out: PathBuf,

    /// Maximum number of ranked words to keep
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    max: usize,
}

fn main() -> ExitCode {
    byteseq::telemetry::init_tracing();
    let args = Args::parse();

    let dictionary = match Dictionary::from_file(&args.dataset, args.max) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            error!(error = %e, "failed to read dataset");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = dictionary.save(&args.out) {
        error!(error = %e, "failed to write dictionary");
        return ExitCode::FAILURE;
    }

    info!(entries = dictionary.len(), out = %args.out.display(), "wrote dictionary");
    ExitCode::SUCCESS
}
