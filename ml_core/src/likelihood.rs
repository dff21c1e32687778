use crate::Result;

/// A probability density over a single feature value.
///
/// A `Likelihood` only knows how to score one scalar against the location and
/// spread of a fitted distribution. It does not:
/// - know which class the parameters came from,
/// - aggregate scores across features,
/// - pick a winning class.
///
/// The predictor treats this trait as a black box, so alternative densities
/// can be swapped in without touching the scoring loop.
pub trait Likelihood {
    /// Returns the density of `value` under a distribution with the given `mean` and `stdev`.
    ///
    /// # Args
    /// * `value` - The observed feature value.
    /// * `mean` - Location of the fitted distribution.
    /// * `stdev` - Spread of the fitted distribution.
    ///
    /// # Returns
    /// A non-negative density.
    ///
    /// # Errors
    /// Implementations should return `MlError::UnknownLikelihoodDomain` when the
    /// density is undefined for the given parameters and no fallback applies.
    fn density(&self, value: f64, mean: f64, stdev: f64) -> Result<f64>;

    /// Returns the natural logarithm of [`Likelihood::density`].
    ///
    /// A zero density maps to negative infinity.
    fn log_density(&self, value: f64, mean: f64, stdev: f64) -> Result<f64> {
        self.density(value, mean, stdev).map(f64::ln)
    }
}

impl<T: Likelihood + ?Sized> Likelihood for &T {
    fn density(&self, value: f64, mean: f64, stdev: f64) -> Result<f64> {
        (**self).density(value, mean, stdev)
    }

    fn log_density(&self, value: f64, mean: f64, stdev: f64) -> Result<f64> {
        (**self).log_density(value, mean, stdev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Uniform;

    impl Likelihood for Uniform {
        fn density(&self, _value: f64, _mean: f64, _stdev: f64) -> Result<f64> {
            Ok(0.5)
        }
    }

    #[test]
    fn log_density_defaults_to_ln_of_density() {
        let ld = Uniform.log_density(1.0, 0.0, 1.0).unwrap();
        assert!((ld - 0.5f64.ln()).abs() < 1e-12);
    }

    fn score<Li: Likelihood>(likelihood: Li) -> f64 {
        likelihood.density(3.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn references_forward_to_the_inner_likelihood() {
        assert_eq!(score(&Uniform), 0.5);

        let dynamic: &dyn Likelihood = &Uniform;
        assert_eq!(score(dynamic), 0.5);
    }
}
