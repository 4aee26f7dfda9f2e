//! Sequence encoding binary.
//!
//! Encodes every line of the given text files into one-hot byte grids and
//! reports the resulting dataset. With no paths, encodes `test.txt`.

use byteseq::data::one_hot_rows;
use byteseq::{ByteMapping, Config, Dataset, Padding, DEFAULT_MAX_LEN};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "byteseq-encode",
    about = "Encode text lines into fixed-length one-hot byte sequences"
)]
struct Args {
    /// Text files to encode, in order
    #[arg(default_value = "test.txt")]
    paths: Vec<PathBuf>,

    /// Rows per encoded sequence, terminator included
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,

    /// What the rows after the terminator hold
    #[arg(long, value_enum, default_value_t = PaddingArg::Terminator)]
    padding: PaddingArg,

    /// How line content maps to byte symbols
    #[arg(long, value_enum, default_value_t = MappingArg::Bytes)]
    mapping: MappingArg,

    /// Print the decoded content and one-hot row count of the first N sequences
    #[arg(long, default_value_t = 0)]
    preview: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaddingArg {
    /// Only the terminator row is set
    Terminator,
    /// Every trailing row holds the terminator
    Sentinel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MappingArg {
    /// Raw bytes of the line
    Bytes,
    /// Unicode code points, rejecting those above 255
    CodePoint,
}

impl From<PaddingArg> for Padding {
    fn from(arg: PaddingArg) -> Self {
        match arg {
            PaddingArg::Terminator => Padding::TerminatorOnly,
            PaddingArg::Sentinel => Padding::Sentinel,
        }
    }
}

impl From<MappingArg> for ByteMapping {
    fn from(arg: MappingArg) -> Self {
        match arg {
            MappingArg::Bytes => ByteMapping::Utf8Bytes,
            MappingArg::CodePoint => ByteMapping::CodePoint,
        }
    }
}

fn main() -> ExitCode {
    byteseq::telemetry::init_tracing();
    let args = Args::parse();

    let config = Config {
        max_len: args.max_len,
        padding: args.padding.into(),
        mapping: args.mapping.into(),
    };
    info!(?config, files = args.paths.len(), "encoding");

    let dataset = match Dataset::load(&args.paths, config) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!(error = %e, "encoding failed");
            return ExitCode::FAILURE;
        }
    };

    for source in dataset.sources() {
        info!(path = %source.path.display(), lines = source.lines, "encoded");
    }
    println!(
        "{} sequences, shape ({}, {}, {})",
        dataset.len(),
        dataset.len(),
        dataset.max_len(),
        byteseq::ALPHABET_SIZE
    );

    for (index, grid) in dataset.iter().enumerate().take(args.preview) {
        let bytes = byteseq::decode_sequence(grid.view());
        let rows = one_hot_rows(grid.view());
        println!("{index:>6}  {rows:>4}  {}", String::from_utf8_lossy(&bytes));
    }

    ExitCode::SUCCESS
}
