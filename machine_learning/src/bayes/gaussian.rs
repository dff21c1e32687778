use std::f64::consts::PI;

use ml_core::{Likelihood, MlError, Result};
use serde::{Deserialize, Serialize};

/// What to do when a feature has zero spread within a class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Treat the feature as a point mass: density 1 on the mean, 0 elsewhere.
    #[default]
    PointMass,
    /// Fail with `MlError::UnknownLikelihoodDomain`.
    Strict,
}

/// Gaussian probability density function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gaussian {
    policy: DegeneratePolicy,
}

impl Gaussian {
    /// Returns a new `Gaussian` with the `PointMass` degenerate policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `Gaussian`.
    ///
    /// # Arguments
    /// * `policy` - How to handle a zero stdev.
    ///
    /// # Returns
    /// A new `Gaussian` instance.
    pub fn with_policy(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    /// Resolves the zero-stdev case, `None` means the regular formula applies.
    fn degenerate(&self, value: f64, mean: f64, stdev: f64) -> Option<Result<f64>> {
        if stdev < 0.0 {
            return Some(Err(MlError::InvalidInput("stdev must be non-negative")));
        }

        if stdev != 0.0 {
            return None;
        }

        Some(match self.policy {
            DegeneratePolicy::PointMass => Ok(if value == mean { 1.0 } else { 0.0 }),
            DegeneratePolicy::Strict => Err(MlError::UnknownLikelihoodDomain { value, mean }),
        })
    }
}

impl Likelihood for Gaussian {
    fn density(&self, value: f64, mean: f64, stdev: f64) -> Result<f64> {
        if let Some(res) = self.degenerate(value, mean, stdev) {
            return res;
        }

        let z = (value - mean) / stdev;
        Ok((-z.powi(2) / 2.0).exp() / (stdev * (2.0 * PI).sqrt()))
    }

    fn log_density(&self, value: f64, mean: f64, stdev: f64) -> Result<f64> {
        if let Some(res) = self.degenerate(value, mean, stdev) {
            return res.map(f64::ln);
        }

        let z = (value - mean) / stdev;
        Ok(-z.powi(2) / 2.0 - stdev.ln() - 0.5 * (2.0 * PI).ln())
    }
}
