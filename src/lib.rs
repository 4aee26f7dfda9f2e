//! # byteseq
//!
//! One-hot byte sequence encoding for line-delimited text.
//!
//! ## Overview
//!
//! Every line of every input file becomes a fixed-shape `(L, 256)` boolean grid:
//! the line is truncated to `L - 1` symbols, a `0` terminator is appended, and
//! row `i` marks the byte value at position `i`. The grids are collected, in
//! file-then-line order, into an immutable [`Dataset`] ready to be fed to a model.
//!
//! ## Structure
//!
//! - [`core`] — Sequence encoder, line encoding, error types
//! - [`data`] — Encoded dataset, chat-log conversion, word dictionary
//! - [`utils`] — Line-ending and escaping helpers
//! - [`telemetry`] — Tracing setup for the binaries

pub mod core;
pub mod data;
pub mod telemetry;
pub mod utils;

pub use crate::core::{
    decode_sequence, ByteMapping, LineError, Padding, SeqError, SeqResult, SequenceEncoder,
    ALPHABET_SIZE, TERMINATOR,
};
pub use crate::data::{Dataset, Dictionary, SourceFile};

/// Default maximum sequence length (`L`).
pub const DEFAULT_MAX_LEN: usize = 64;

/// Encoder configuration.
///
/// Passed to [`SequenceEncoder::new`] and [`Dataset::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of rows in every encoded sequence, terminator included.
    pub max_len: usize,
    /// What the rows after the terminator hold.
    pub padding: Padding,
    /// How line content maps to byte symbols.
    pub mapping: ByteMapping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            padding: Padding::TerminatorOnly,
            mapping: ByteMapping::Utf8Bytes,
        }
    }
}

impl Config {
    /// Default configuration with a custom sequence length.
    #[must_use]
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            ..Self::default()
        }
    }
}
