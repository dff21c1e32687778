use std::{
    fmt::{self, Display},
    hash::Hash,
};

use indexmap::IndexMap;
use log::debug;
use ml_core::{Result, stats};
use serde::Serialize;

use super::{ConfusionMatrix, check_lengths};

/// Fraction of positions where the prediction equals the true label.
///
/// # Arguments
/// * `predicted` - The predicted labels.
/// * `truth` - The true labels, parallel to `predicted`.
///
/// # Returns
/// A value in `[0, 1]`, or an error if the sequences are empty or differ in length.
pub fn accuracy<L: PartialEq>(predicted: &[L], truth: &[L]) -> Result<f64> {
    check_lengths(predicted, truth)?;

    let hits = predicted.iter().zip(truth).filter(|(p, t)| p == t).count();
    Ok(hits as f64 / truth.len() as f64)
}

/// One-vs-rest recall of every label present in `truth`, in order of first appearance.
pub fn per_class_recall<L>(predicted: &[L], truth: &[L]) -> Result<IndexMap<L, f64>>
where
    L: Eq + Hash + Clone,
{
    check_lengths(predicted, truth)?;
    Ok(hit_ratios(truth, predicted))
}

/// Unweighted mean of [`per_class_recall`].
///
/// Labels that only appear in `predicted` have no recall and are skipped.
pub fn macro_recall<L>(predicted: &[L], truth: &[L]) -> Result<f64>
where
    L: Eq + Hash + Clone,
{
    let recall = per_class_recall(predicted, truth)?;
    stats::mean(&recall.into_values().collect::<Vec<_>>())
}

/// One-vs-rest precision of every label present in `predicted`, in order of first appearance.
pub fn per_class_precision<L>(predicted: &[L], truth: &[L]) -> Result<IndexMap<L, f64>>
where
    L: Eq + Hash + Clone,
{
    check_lengths(predicted, truth)?;
    Ok(hit_ratios(predicted, truth))
}

/// Unweighted mean of [`per_class_precision`].
///
/// Labels that are never predicted have no precision and are skipped.
pub fn macro_precision<L>(predicted: &[L], truth: &[L]) -> Result<f64>
where
    L: Eq + Hash + Clone,
{
    let precision = per_class_precision(predicted, truth)?;
    stats::mean(&precision.into_values().collect::<Vec<_>>())
}

/// For each label of `keys`, the fraction of its positions where `other` agrees.
fn hit_ratios<L>(keys: &[L], other: &[L]) -> IndexMap<L, f64>
where
    L: Eq + Hash + Clone,
{
    let mut tally: IndexMap<L, (usize, usize)> = IndexMap::new();
    for (k, o) in keys.iter().zip(other) {
        let (hits, total) = tally.entry(k.clone()).or_default();
        *total += 1;
        if k == o {
            *hits += 1;
        }
    }

    tally
        .into_iter()
        .map(|(label, (hits, total))| (label, hits as f64 / total as f64))
        .collect()
}

/// The outcome of evaluating a batch of predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics<L: Eq + Hash> {
    pub accuracy: f64,
    pub macro_recall: f64,
    pub macro_precision: f64,
    pub recall: IndexMap<L, f64>,
    pub confusion: ConfusionMatrix<L>,
}

/// Computes every metric over `predicted` against `truth`.
///
/// # Arguments
/// * `predicted` - The predicted labels.
/// * `truth` - The true labels, parallel to `predicted`.
///
/// # Returns
/// The metrics, or an error if the sequences are empty or differ in length.
pub fn evaluate<L>(predicted: &[L], truth: &[L]) -> Result<Metrics<L>>
where
    L: Ord + Hash + Clone,
{
    let recall = per_class_recall(predicted, truth)?;
    let metrics = Metrics {
        accuracy: accuracy(predicted, truth)?,
        macro_recall: stats::mean(&recall.values().copied().collect::<Vec<_>>())?,
        macro_precision: macro_precision(predicted, truth)?,
        recall,
        confusion: ConfusionMatrix::new(predicted, truth)?,
    };

    debug!(
        "evaluated {} prediction(s) over {} label(s)",
        truth.len(),
        metrics.confusion.labels().len()
    );

    Ok(metrics)
}

impl<L: Eq + Hash + Display> Display for Metrics<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accuracy:        {:.4}", self.accuracy)?;
        writeln!(f, "macro recall:    {:.4}", self.macro_recall)?;
        writeln!(f, "macro precision: {:.4}", self.macro_precision)?;
        writeln!(f, "recall per class:")?;
        for (label, recall) in &self.recall {
            writeln!(f, "  {label}: {recall:.4}")?;
        }
        writeln!(f, "confusion matrix (rows = true, columns = predicted):")?;
        write!(f, "{}", self.confusion)
    }
}
