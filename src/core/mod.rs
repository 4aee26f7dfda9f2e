//! Core sequence encoder.
//!
//! Turns lines of text into fixed-shape one-hot grids:
//! - Lines are truncated to `max_len - 1` symbols
//! - A terminator symbol (`0`) is appended
//! - Row `i` of the `(max_len, 256)` grid marks the symbol at position `i`
//!
//! ## Layout
//!
//! ```text
//! "hi", max_len = 64
//!
//! row 0   col 'h' (104)  true
//! row 1   col 'i' (105)  true
//! row 2   col 0          true   <- terminator
//! row 3.. all false             (Padding::TerminatorOnly)
//! ```

use ndarray::{s, Array2, ArrayView2};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::data::{Dataset, SourceFile};
use crate::utils::strip_line_ending;
use crate::Config;

/// Number of columns in every encoded row: one per byte value.
pub const ALPHABET_SIZE: usize = 256;

/// Symbol appended after the truncated line.
pub const TERMINATOR: u8 = 0;

/// What the rows after the terminator hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Only the terminator row is written; trailing rows stay all-false.
    #[default]
    TerminatorOnly,
    /// Every trailing row repeats the terminator one-hot.
    Sentinel,
}

/// How the content of a line maps to byte symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteMapping {
    /// Every raw byte of the line is one symbol. Truncation counts bytes.
    #[default]
    Utf8Bytes,
    /// The line is decoded as UTF-8 and every character is one symbol.
    /// Characters above U+00FF are rejected. Truncation counts characters.
    CodePoint,
}

/// A single line that could not be mapped to byte symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("code point U+{code_point:04X} at column {column} does not fit in a byte")]
    OutOfRange { column: usize, code_point: u32 },
    #[error("invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Errors raised while building a dataset.
#[derive(Debug, Error)]
pub enum SeqError {
    /// The input path does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    /// Opening, reading or writing a file failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A line could not be encoded. `line` is 1-based.
    #[error("{}:{line}: {source}", .path.display())]
    Line {
        path: PathBuf,
        line: usize,
        #[source]
        source: LineError,
    },
    /// Invalid encoder configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl SeqError {
    /// Attach a path to an I/O error, separating out missing files.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            SeqError::NotFound { path }
        } else {
            SeqError::Io { path, source }
        }
    }
}

pub type SeqResult<T> = Result<T, SeqError>;

/// Encodes lines and files into one-hot byte grids.
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    config: Config,
}

impl SequenceEncoder {
    /// Create an encoder.
    ///
    /// # Errors
    /// - `InvalidConfig` if `max_len` is 0 (no room for the terminator)
    pub fn new(config: Config) -> SeqResult<Self> {
        if config.max_len == 0 {
            return Err(SeqError::InvalidConfig(
                "max_len must be at least 1 to hold the terminator".to_string(),
            ));
        }
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of rows in every encoded grid.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.config.max_len
    }

    /// Map a raw line (without its line ending) to at most `max_len - 1` symbols.
    ///
    /// # Errors
    /// Only with [`ByteMapping::CodePoint`]: the line is not valid UTF-8, or a
    /// kept character does not fit in a byte.
    pub fn symbols(&self, line: &[u8]) -> Result<Vec<u8>, LineError> {
        let limit = self.config.max_len - 1;
        match self.config.mapping {
            ByteMapping::Utf8Bytes => Ok(line[..line.len().min(limit)].to_vec()),
            ByteMapping::CodePoint => {
                let text = std::str::from_utf8(line).map_err(|e| LineError::InvalidUtf8 {
                    valid_up_to: e.valid_up_to(),
                })?;
                text.chars()
                    .take(limit)
                    .enumerate()
                    .map(|(column, c)| {
                        let code_point = u32::from(c);
                        u8::try_from(code_point)
                            .map_err(|_| LineError::OutOfRange { column, code_point })
                    })
                    .collect()
            }
        }
    }

    /// Encode one line (without its line ending) into a `(max_len, 256)` grid.
    ///
    /// # Errors
    /// See [`SequenceEncoder::symbols`].
    pub fn encode_line(&self, line: &[u8]) -> Result<Array2<bool>, LineError> {
        let symbols = self.symbols(line)?;
        Ok(self.encode_symbols(&symbols))
    }

    /// Encode one line of text. Same as [`SequenceEncoder::encode_line`] on its bytes.
    ///
    /// # Errors
    /// See [`SequenceEncoder::symbols`].
    pub fn encode_str(&self, line: &str) -> Result<Array2<bool>, LineError> {
        self.encode_line(line.as_bytes())
    }

    fn encode_symbols(&self, symbols: &[u8]) -> Array2<bool> {
        let max_len = self.config.max_len;
        debug_assert!(symbols.len() < max_len);

        let mut grid = Array2::from_elem((max_len, ALPHABET_SIZE), false);
        for (i, &symbol) in symbols.iter().enumerate() {
            grid[[i, usize::from(symbol)]] = true;
        }

        let end = symbols.len();
        grid[[end, usize::from(TERMINATOR)]] = true;

        if self.config.padding == Padding::Sentinel {
            grid.slice_mut(s![end + 1.., usize::from(TERMINATOR)])
                .fill(true);
        }

        grid
    }

    /// Encode every line of one file, in order.
    ///
    /// The file handle is dropped on every return path, including read errors.
    ///
    /// # Errors
    /// - `NotFound` if the path does not exist
    /// - `Io` if the file cannot be opened or read
    /// - `Line` if a line cannot be mapped to bytes
    pub fn encode_file(&self, path: impl AsRef<Path>) -> SeqResult<Vec<Array2<bool>>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SeqError::io(path, e))?;
        let mut reader = BufReader::new(file);

        let mut sequences = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| SeqError::io(path, e))?;
            if read == 0 {
                break;
            }

            let grid = self
                .encode_line(strip_line_ending(&buf))
                .map_err(|source| SeqError::Line {
                    path: path.to_path_buf(),
                    line: sequences.len() + 1,
                    source,
                })?;
            sequences.push(grid);
        }

        debug!(path = %path.display(), lines = sequences.len(), "encoded file");
        Ok(sequences)
    }

    /// Encode every line of every file, in file-then-line order.
    ///
    /// Files are read one at a time. The first failure aborts the whole load
    /// and no partial dataset is returned.
    ///
    /// # Errors
    /// See [`SequenceEncoder::encode_file`].
    pub fn encode<I, P>(&self, paths: I) -> SeqResult<Dataset>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut sequences = Vec::new();
        let mut sources = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let encoded = self.encode_file(path)?;
            sources.push(SourceFile {
                path: path.to_path_buf(),
                lines: encoded.len(),
            });
            sequences.extend(encoded);
        }

        Ok(Dataset::new(sequences, sources, self.config.max_len))
    }
}

/// Recover the symbols of an encoded grid: the hot column of every row up to
/// the terminator (or the first row with no hot column).
///
/// A `0` byte inside the original line reads back as the terminator.
#[must_use]
pub fn decode_sequence(grid: ArrayView2<'_, bool>) -> Vec<u8> {
    grid.rows()
        .into_iter()
        .map_while(|row| row.iter().position(|&hot| hot))
        .take_while(|&col| col != usize::from(TERMINATOR))
        .map_while(|col| u8::try_from(col).ok())
        .collect()
}
