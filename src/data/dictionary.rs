//! Word dictionary built from a plain-text dataset.
//!
//! Words are ranked by frequency; index 0 is reserved for the unknown token.
//! The text format is one `"{index} {word}"` entry per line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::{SeqError, SeqResult};
use crate::utils::unescape_newlines;

/// Token stored at index 0 for words outside the dictionary.
pub const UNKNOWN_TOKEN: &str = "<UNK>";

/// Default number of ranked words kept (not counting [`UNKNOWN_TOKEN`]).
pub const DEFAULT_MAX_WORDS: usize = 10_000;

/// Punctuation counted as tokens of its own.
const PUNCTUATION: [char; 2] = ['.', ','];

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '.' | ' ' | '\n')
}

/// Count word and punctuation frequencies in a dataset.
///
/// The text is lowercased and split into messages on newlines; escaped `\n`
/// sequences inside a message are turned back into newlines before the
/// message is split on `,`, `.`, space and newline. `.` and `,` are always
/// present in the result, possibly with a count of 0.
#[must_use]
pub fn count_words(text: &str) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = PUNCTUATION
        .iter()
        .map(|p| (p.to_string(), 0))
        .collect();

    let lowered = text.to_lowercase();
    for message in lowered.split('\n') {
        let message = unescape_newlines(message);
        let mut start = 0;

        for (i, c) in message.char_indices() {
            if !is_separator(c) {
                continue;
            }
            if i != start {
                *counts.entry(message[start..i].to_string()).or_insert(0) += 1;
            }
            start = i + c.len_utf8();
            if PUNCTUATION.contains(&c) {
                *counts.entry(c.to_string()).or_insert(0) += 1;
            }
        }

        if start < message.len() {
            *counts.entry(message[start..].to_string()).or_insert(0) += 1;
        }
    }

    counts
}

/// Sort words by descending count; ties are broken alphabetically.
#[must_use]
pub fn rank_words(counts: &HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .map(|(word, &count)| (word.clone(), count))
        .collect();
    ranked.sort_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));
    ranked
}

/// Frequency-ranked word list with `<UNK>` at index 0.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Words in index order.
    pub words: Vec<String>,
    /// Reverse mapping from word to index.
    pub word_to_idx: HashMap<String, usize>,
}

impl Dictionary {
    /// Build a dictionary from the `max_words` most frequent words of `text`.
    #[must_use]
    pub fn build(text: &str, max_words: usize) -> Self {
        let ranked = rank_words(&count_words(text));
        let words = std::iter::once(UNKNOWN_TOKEN.to_string())
            .chain(ranked.into_iter().take(max_words).map(|(word, _)| word))
            .collect();
        Self::from_words(words)
    }

    /// Build a dictionary from a dataset file.
    ///
    /// The file is read as raw bytes; invalid UTF-8 (for example single-byte
    /// encoded text) is replaced with U+FFFD rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: &Path, max_words: usize) -> SeqResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| SeqError::io(path, e))?;
        Ok(Self::build(&String::from_utf8_lossy(&bytes), max_words))
    }

    fn from_words(words: Vec<String>) -> Self {
        let word_to_idx = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self { words, word_to_idx }
    }

    /// Number of entries, `<UNK>` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Index of a word, or `None` if it is not in the dictionary.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.word_to_idx.get(word).copied()
    }

    #[must_use]
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Write `"{index} {word}"` lines.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (i, word) in self.words.iter().enumerate() {
            writeln!(writer, "{i} {word}")?;
        }
        Ok(())
    }

    /// Write the dictionary to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> SeqResult<()> {
        let file = File::create(path).map_err(|e| SeqError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|e| SeqError::io(path, e))
    }
}
