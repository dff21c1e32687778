use std::fmt::{self, Display};

use ml_core::Result;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Serialize;

use super::check_lengths;

/// Counts of (true label, predicted label) pairs.
///
/// Both axes are indexed by the sorted union of the labels found in the true and
/// predicted sequences. Row `i` is the true label, column `j` the predicted one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix<L> {
    labels: Vec<L>,
    counts: Array2<usize>,
}

impl<L: Ord + Clone> ConfusionMatrix<L> {
    /// Creates a new `ConfusionMatrix`.
    ///
    /// # Arguments
    /// * `predicted` - The predicted labels.
    /// * `truth` - The true labels, parallel to `predicted`.
    ///
    /// # Returns
    /// The matrix, or an error if the sequences are empty or differ in length.
    pub fn new(predicted: &[L], truth: &[L]) -> Result<Self> {
        check_lengths(predicted, truth)?;

        let mut labels: Vec<L> = truth.iter().chain(predicted).cloned().collect();
        labels.sort();
        labels.dedup();

        let n = labels.len();
        let mut counts = Array2::zeros((n, n));
        for (p, t) in predicted.iter().zip(truth) {
            // both labels were collected above
            let (Ok(i), Ok(j)) = (labels.binary_search(t), labels.binary_search(p)) else {
                continue;
            };

            counts[[i, j]] += 1;
        }

        Ok(Self { labels, counts })
    }

    /// Returns the amount of samples with true label `truth` predicted as `predicted`.
    pub fn get(&self, truth: &L, predicted: &L) -> Option<usize> {
        let i = self.labels.binary_search(truth).ok()?;
        let j = self.labels.binary_search(predicted).ok()?;
        Some(self.counts[[i, j]])
    }
}

impl<L> ConfusionMatrix<L> {
    /// Returns the sorted labels indexing both axes.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Returns the raw counts, rows are true labels and columns predicted labels.
    pub fn counts(&self) -> ArrayView2<'_, usize> {
        self.counts.view()
    }

    /// Returns the amount of samples of each true label (row sums).
    pub fn true_counts(&self) -> Array1<usize> {
        self.counts.sum_axis(Axis(1))
    }

    /// Returns the amount of times each label was predicted (column sums).
    pub fn predicted_counts(&self) -> Array1<usize> {
        self.counts.sum_axis(Axis(0))
    }

    pub fn total(&self) -> usize {
        self.counts.sum()
    }
}

impl<L: Display> Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CORNER: &str = "true\\pred";

        let names: Vec<String> = self.labels.iter().map(ToString::to_string).collect();
        let width = names
            .iter()
            .map(String::len)
            .chain(self.counts.iter().map(|c| c.to_string().len()))
            .max()
            .unwrap_or_default();
        let head = names.iter().map(String::len).max().unwrap_or_default().max(CORNER.len());

        write!(f, "{CORNER:<head$}")?;
        for name in &names {
            write!(f, " {name:>width$}")?;
        }

        for (name, row) in names.iter().zip(self.counts.outer_iter()) {
            write!(f, "\n{name:<head$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
        }

        Ok(())
    }
}
