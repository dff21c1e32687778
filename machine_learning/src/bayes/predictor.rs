use std::hash::Hash;

use log::trace;
use ml_core::{Likelihood, MlError, Result};
use ndarray::{ArrayView1, ArrayView2};

use super::{FeatureSummary, Prediction, TrainedModel};

/// Scores `row` against every class, folding the per-feature terms with `step`.
fn score_row<L, F>(
    model: &TrainedModel<L>,
    row: ArrayView1<f64>,
    init: f64,
    mut step: F,
) -> Result<Prediction<L>>
where
    L: Eq + Hash + Clone,
    F: FnMut(f64, f64, &FeatureSummary) -> Result<f64>,
{
    if row.len() != model.nfeatures() {
        return Err(MlError::DimensionMismatch {
            what: "row",
            got: row.len(),
            expected: model.nfeatures(),
        });
    }

    let scores = model
        .classes()
        .map(|(label, summaries)| {
            let mut acc = init;
            for (&value, summary) in row.iter().zip(summaries) {
                acc = step(acc, value, summary)?;
            }

            Ok((label.clone(), acc))
        })
        .collect::<Result<_>>()?;

    Ok(Prediction::new(scores))
}

/// Computes the joint likelihood of `row` under every class of `model`.
///
/// Each score is the product over features of `likelihood.density`, with no
/// class prior and no normalization.
///
/// # Arguments
/// * `model` - The trained model.
/// * `row` - A feature vector with as many features as the model.
/// * `likelihood` - The per-feature density.
///
/// # Returns
/// The per-class scores, or an error if the row has the wrong length or the
/// likelihood is undefined for some feature.
pub fn class_probability_single<L, Li>(
    model: &TrainedModel<L>,
    row: ArrayView1<f64>,
    likelihood: &Li,
) -> Result<Prediction<L>>
where
    L: Eq + Hash + Clone,
    Li: Likelihood + ?Sized,
{
    score_row(model, row, 1.0, |acc, value, s| {
        Ok(acc * likelihood.density(value, s.mean, s.stdev)?)
    })
}

/// Log-space counterpart of [`class_probability_single`].
///
/// Each score is the sum over features of `likelihood.log_density`, so many
/// small densities don't underflow to zero. A zero density yields `-inf`.
pub fn class_log_probability_single<L, Li>(
    model: &TrainedModel<L>,
    row: ArrayView1<f64>,
    likelihood: &Li,
) -> Result<Prediction<L>>
where
    L: Eq + Hash + Clone,
    Li: Likelihood + ?Sized,
{
    score_row(model, row, 0.0, |acc, value, s| {
        Ok(acc + likelihood.log_density(value, s.mean, s.stdev)?)
    })
}

/// Applies [`class_probability_single`] to every row of `rows`.
pub fn class_probability<L, Li>(
    model: &TrainedModel<L>,
    rows: ArrayView2<f64>,
    likelihood: &Li,
) -> Result<Vec<Prediction<L>>>
where
    L: Eq + Hash + Clone,
    Li: Likelihood + ?Sized,
{
    rows.outer_iter()
        .map(|row| class_probability_single(model, row, likelihood))
        .collect()
}

/// Predicts the label of every row of `rows`.
///
/// # Arguments
/// * `model` - The trained model.
/// * `rows` - The feature matrix, one sample per row.
/// * `likelihood` - The per-feature density.
///
/// # Returns
/// One label per row, in the same order. Exactly tied scores resolve to the
/// label that was seen first during training.
pub fn predict<L, Li>(
    model: &TrainedModel<L>,
    rows: ArrayView2<f64>,
    likelihood: &Li,
) -> Result<Vec<L>>
where
    L: Eq + Hash + Clone,
    Li: Likelihood + ?Sized,
{
    select_best(rows, |row| class_probability_single(model, row, likelihood))
}

/// Like [`predict`] but ranks classes by their log-likelihood.
pub fn predict_log<L, Li>(
    model: &TrainedModel<L>,
    rows: ArrayView2<f64>,
    likelihood: &Li,
) -> Result<Vec<L>>
where
    L: Eq + Hash + Clone,
    Li: Likelihood + ?Sized,
{
    select_best(rows, |row| {
        class_log_probability_single(model, row, likelihood)
    })
}

fn select_best<L, F>(rows: ArrayView2<f64>, mut score: F) -> Result<Vec<L>>
where
    L: Eq + Hash + Clone,
    F: FnMut(ArrayView1<f64>) -> Result<Prediction<L>>,
{
    rows.outer_iter()
        .enumerate()
        .map(|(i, row)| {
            let prediction = score(row)?;
            let best = prediction
                .best()
                .cloned()
                .ok_or(MlError::InvalidInput("model has no classes"))?;

            trace!("row {i}: {} class(es) scored", prediction.len());
            Ok(best)
        })
        .collect()
}
