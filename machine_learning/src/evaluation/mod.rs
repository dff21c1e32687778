mod confusion;
mod metrics;

use ml_core::{MlError, Result};

pub use confusion::ConfusionMatrix;
pub use metrics::{
    Metrics, accuracy, evaluate, macro_precision, macro_recall, per_class_precision,
    per_class_recall,
};

/// Builds a [`ConfusionMatrix`] with rows indexed by `truth` and columns by `predicted`.
pub fn confusion_matrix<L>(predicted: &[L], truth: &[L]) -> Result<ConfusionMatrix<L>>
where
    L: Ord + Clone,
{
    ConfusionMatrix::new(predicted, truth)
}

/// Checks that `predicted` and `truth` are parallel and non-empty.
fn check_lengths<L>(predicted: &[L], truth: &[L]) -> Result<()> {
    if predicted.len() != truth.len() {
        return Err(MlError::LengthMismatch {
            a: "predicted",
            b: "truth",
            got: predicted.len(),
            expected: truth.len(),
        });
    }

    if truth.is_empty() {
        return Err(MlError::EmptyInput { what: "truth" });
    }

    Ok(())
}
