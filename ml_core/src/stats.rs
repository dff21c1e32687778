//! Descriptive statistics over a sequence of samples.

use crate::{MlError, Result};

/// Computes the arithmetic mean of `samples`.
///
/// # Args
/// * `samples` - The values to average.
///
/// # Returns
/// The mean, or `MlError::EmptyInput` if `samples` is empty.
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(MlError::EmptyInput { what: "mean" });
    }

    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Computes the sample standard deviation of `samples` (Bessel-corrected, divisor `n - 1`).
///
/// # Args
/// * `samples` - The values to measure.
///
/// # Returns
/// The standard deviation, `MlError::EmptyInput` if `samples` is empty or
/// `MlError::InsufficientSamples` if it holds a single value.
pub fn stdev(samples: &[f64]) -> Result<f64> {
    let m = mean(samples)?;
    let n = samples.len();
    if n < 2 {
        return Err(MlError::InsufficientSamples {
            what: "stdev",
            got: n,
            required: 2,
        });
    }

    let sq_diff: f64 = samples.iter().map(|x| (x - m).powi(2)).sum();
    Ok((sq_diff / (n - 1) as f64).sqrt())
}
