//! Encoded dataset: every line of every input file as a one-hot grid.
//!
//! Built eagerly by [`SequenceEncoder::encode`] or [`Dataset::load`] and never
//! mutated afterwards.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use std::path::{Path, PathBuf};

use crate::core::{decode_sequence, SeqResult, SequenceEncoder, ALPHABET_SIZE};
use crate::Config;

/// One input file and the number of sequences it contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: usize,
}

/// Ordered collection of encoded sequences, in file-then-line order.
#[derive(Debug, Clone)]
pub struct Dataset {
    sequences: Vec<Array2<bool>>,
    sources: Vec<SourceFile>,
    max_len: usize,
}

impl Dataset {
    pub(crate) fn new(
        sequences: Vec<Array2<bool>>,
        sources: Vec<SourceFile>,
        max_len: usize,
    ) -> Self {
        Self {
            sequences,
            sources,
            max_len,
        }
    }

    /// Encode every line of `paths` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a file is missing or
    /// unreadable, or a line cannot be mapped to bytes. No partial dataset is
    /// returned.
    pub fn load<I, P>(paths: I, config: Config) -> SeqResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        SequenceEncoder::new(config)?.encode(paths)
    }

    /// Number of sequences (total line count across all files).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Rows per sequence.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Array2<bool>> {
        self.sequences.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Array2<bool>> {
        self.sequences.iter()
    }

    #[must_use]
    pub fn sequences(&self) -> &[Array2<bool>] {
        &self.sequences
    }

    /// Input files in load order.
    #[must_use]
    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    #[must_use]
    pub fn into_sequences(self) -> Vec<Array2<bool>> {
        self.sequences
    }

    /// Bytes of sequence `index` up to its terminator.
    #[must_use]
    pub fn decode(&self, index: usize) -> Option<Vec<u8>> {
        self.get(index).map(|grid| decode_sequence(grid.view()))
    }

    /// Stack every sequence into one `(n, max_len, 256)` tensor.
    #[must_use]
    pub fn to_tensor(&self) -> Array3<bool> {
        let mut tensor = Array3::from_elem((self.len(), self.max_len, ALPHABET_SIZE), false);
        for (mut slot, grid) in tensor.axis_iter_mut(Axis(0)).zip(&self.sequences) {
            slot.assign(grid);
        }
        tensor
    }

    /// Same as [`Dataset::to_tensor`] with `1.0` for hot entries, `0.0` elsewhere.
    #[must_use]
    pub fn to_f32(&self) -> Array3<f32> {
        self.to_tensor().mapv(|hot| if hot { 1.0 } else { 0.0 })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Array2<bool>;
    type IntoIter = std::slice::Iter<'a, Array2<bool>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}

/// Number of one-hot rows in a grid (rows with exactly one hot column).
#[must_use]
pub fn one_hot_rows(grid: ArrayView2<'_, bool>) -> usize {
    grid.rows()
        .into_iter()
        .filter(|row| row.iter().filter(|&&hot| hot).count() == 1)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn small_dataset() -> Dataset {
        let encoder = SequenceEncoder::new(Config::with_max_len(4)).unwrap();
        let sequences = vec![
            encoder.encode_str("ab").unwrap(),
            encoder.encode_str("xyz!").unwrap(),
        ];
        let sources = vec![SourceFile {
            path: PathBuf::from("mem.txt"),
            lines: 2,
        }];
        Dataset::new(sequences, sources, 4)
    }

    #[test]
    fn test_accessors() {
        let dataset = small_dataset();
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.max_len(), 4);
        assert_eq!(dataset.sources()[0].lines, 2);
        assert!(dataset.get(2).is_none());
        assert_eq!(dataset.iter().count(), 2);
    }

    #[test]
    fn test_decode() {
        let dataset = small_dataset();
        assert_eq!(dataset.decode(0), Some(b"ab".to_vec()));
        // Truncated to max_len - 1
        assert_eq!(dataset.decode(1), Some(b"xyz".to_vec()));
        assert_eq!(dataset.decode(5), None);
    }

    #[test]
    fn test_to_tensor_shape_and_content() {
        let dataset = small_dataset();
        let tensor = dataset.to_tensor();
        assert_eq!(tensor.shape(), &[2, 4, ALPHABET_SIZE]);
        assert!(tensor[[0, 0, usize::from(b'a')]]);
        assert!(tensor[[0, 2, 0]]);
        assert!(!tensor[[0, 3, 0]]);
        assert!(tensor[[1, 3, 0]]);
    }

    #[test]
    fn test_to_f32_counts_hot_entries() {
        let dataset = small_dataset();
        let dense = dataset.to_f32();
        // "ab" + terminator = 3, "xyz" + terminator = 4
        assert_abs_diff_eq!(dense.sum(), 7.0, epsilon = 1e-6);
    }

    #[test]
    fn test_one_hot_rows() {
        let dataset = small_dataset();
        assert_eq!(one_hot_rows(dataset.sequences()[0].view()), 3);
        assert_eq!(one_hot_rows(dataset.sequences()[1].view()), 4);
    }

    #[test]
    fn test_empty_dataset_tensor() {
        let dataset = Dataset::new(Vec::new(), Vec::new(), 8);
        assert!(dataset.is_empty());
        assert_eq!(dataset.to_tensor().shape(), &[0, 8, ALPHABET_SIZE]);
    }
}
