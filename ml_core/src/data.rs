use ndarray::{Array2, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::{MlError, Result};

/// A labeled in-memory dataset: one feature row per label.
///
/// A `Dataset` is responsible only for *holding* samples.
/// It does not define:
/// - how rows are grouped per class,
/// - which likelihood scores them,
/// - how predictions are evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<L> {
    x: Array2<f64>,
    y: Vec<L>,
}

impl<L: Clone> Dataset<L> {
    /// Creates a new `Dataset` from a feature matrix and its labels.
    ///
    /// # Args
    /// * `x` - The feature matrix, one sample per row.
    /// * `y` - The label of each row.
    ///
    /// # Returns
    /// A new `Dataset`, or an error if it's empty or `x` and `y` differ in length.
    pub fn new(x: Array2<f64>, y: Vec<L>) -> Result<Self> {
        if y.is_empty() {
            return Err(MlError::EmptyInput { what: "dataset" });
        }

        if x.nrows() != y.len() {
            return Err(MlError::LengthMismatch {
                a: "rows",
                b: "labels",
                got: x.nrows(),
                expected: y.len(),
            });
        }

        Ok(Self { x, y })
    }

    /// Creates a new `Dataset` from owned rows.
    ///
    /// # Args
    /// * `rows` - The feature vectors, all of the same length.
    /// * `labels` - The label of each row.
    ///
    /// # Returns
    /// A new `Dataset`, or an error if any row length differs from the first one.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<L>) -> Result<Self> {
        let nfeatures = rows.first().map(Vec::len).unwrap_or_default();
        let nrows = rows.len();

        let mut flat = Vec::with_capacity(nrows * nfeatures);
        for row in rows {
            if row.len() != nfeatures {
                return Err(MlError::DimensionMismatch {
                    what: "row",
                    got: row.len(),
                    expected: nfeatures,
                });
            }

            flat.extend(row);
        }

        let x = Array2::from_shape_vec((nrows, nfeatures), flat)
            .map_err(|_| MlError::InvalidInput("rows do not form a matrix"))?;

        Self::new(x, labels)
    }

    /// Shuffles the rows with `rng` and partitions them into a train and a test set.
    ///
    /// The caller owns the random state, so seeding it makes the split reproducible.
    ///
    /// # Args
    /// * `test_ratio` - Fraction of rows that go to the test set, in `(0, 1)`.
    /// * `rng` - The random source used for shuffling.
    ///
    /// # Returns
    /// `(train, test)`, both non-empty.
    pub fn split<R: Rng + ?Sized>(&self, test_ratio: f64, rng: &mut R) -> Result<(Self, Self)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(MlError::InvalidInput("test ratio must be within (0, 1)"));
        }

        let n = self.len();
        if n < 2 {
            return Err(MlError::InsufficientSamples {
                what: "split",
                got: n,
                required: 2,
            });
        }

        let ntest = ((n as f64 * test_ratio).round() as usize).clamp(1, n - 1);

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);
        let (test_idx, train_idx) = indices.split_at(ntest);

        Ok((self.select(train_idx), self.select(test_idx)))
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i].clone()).collect(),
        }
    }
}

impl<L> Dataset<L> {
    /// Returns a view of the feature matrix.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// Returns the labels, one per row.
    pub fn y(&self) -> &[L] {
        &self.y
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns the number of features per row.
    pub fn nfeatures(&self) -> usize {
        self.x.ncols()
    }
}
