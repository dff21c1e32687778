pub mod bayes;
pub mod evaluation;

pub use ml_core::{Dataset, Likelihood, MlError, Result};
