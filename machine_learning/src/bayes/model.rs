use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Location and spread of one feature within one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub mean: f64,
    pub stdev: f64,
}

impl FeatureSummary {
    pub fn new(mean: f64, stdev: f64) -> Self {
        Self { mean, stdev }
    }

    /// Whether the feature took a single value in the class, leaving the density undefined.
    pub fn is_degenerate(&self) -> bool {
        self.stdev == 0.0
    }
}

/// A fitted Gaussian Naive Bayes model: per class, one `FeatureSummary` per feature.
///
/// Classes keep the order in which their label first appeared in the training labels,
/// which is also the order predictions are scanned in when breaking ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "L: Serialize + Eq + Hash",
    deserialize = "L: Deserialize<'de> + Eq + Hash"
))]
pub struct TrainedModel<L: Eq + Hash> {
    classes: IndexMap<L, Vec<FeatureSummary>>,
    nfeatures: usize,
}

impl<L: Eq + Hash> TrainedModel<L> {
    /// Creates a new `TrainedModel`.
    ///
    /// # Arguments
    /// * `classes` - The per-class summaries, all of length `nfeatures`.
    /// * `nfeatures` - The feature count every row must match.
    pub(crate) fn new(classes: IndexMap<L, Vec<FeatureSummary>>, nfeatures: usize) -> Self {
        Self { classes, nfeatures }
    }

    /// Returns the summaries of `label`, if it was seen during training.
    pub fn class(&self, label: &L) -> Option<&[FeatureSummary]> {
        self.classes.get(label).map(Vec::as_slice)
    }

    /// Iterates over every class in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = (&L, &[FeatureSummary])> {
        self.classes.iter().map(|(l, s)| (l, s.as_slice()))
    }

    /// Iterates over the labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.classes.keys()
    }

    /// Returns the amount of classes in the model.
    pub fn nclasses(&self) -> usize {
        self.classes.len()
    }

    /// Returns the feature count the model was trained with.
    pub fn nfeatures(&self) -> usize {
        self.nfeatures
    }
}

/// Unnormalized per-class scores for a single row.
///
/// Scores are either joint likelihoods or their logarithms, depending on the
/// function that produced them. Either way they only rank classes, they are not
/// calibrated probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<L: Eq + Hash> {
    scores: IndexMap<L, f64>,
}

impl<L: Eq + Hash> Prediction<L> {
    pub(crate) fn new(scores: IndexMap<L, f64>) -> Self {
        Self { scores }
    }

    /// Returns the score of `label`.
    pub fn score(&self, label: &L) -> Option<f64> {
        self.scores.get(label).copied()
    }

    /// Iterates over `(label, score)` in model order.
    pub fn scores(&self) -> impl Iterator<Item = (&L, f64)> {
        self.scores.iter().map(|(l, &s)| (l, s))
    }

    /// Returns the label with the highest score.
    ///
    /// On exactly equal scores the label that comes first in model order wins.
    pub fn best(&self) -> Option<&L> {
        let mut it = self.scores.iter();
        let (mut best, mut best_score) = it.next()?;

        for (label, score) in it {
            if score > best_score {
                best = label;
                best_score = score;
            }
        }

        Some(best)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
