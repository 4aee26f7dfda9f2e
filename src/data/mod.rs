//! Encoded datasets and the text-preparation tools that feed them.
//!
//! ## Submodules
//!
//! - [`dataset`] — Ordered collection of encoded sequences
//! - [`logs`] — JSON-lines chat logs to a line-per-message text dataset
//! - [`dictionary`] — Frequency-ranked word dictionary of a text dataset

pub mod dataset;
pub mod dictionary;
pub mod logs;

pub use dataset::{one_hot_rows, Dataset, SourceFile};
pub use dictionary::{count_words, rank_words, Dictionary, UNKNOWN_TOKEN};
pub use logs::{convert_log, convert_log_file, convert_logs, message_text, write_dataset, LogReport};
