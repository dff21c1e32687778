mod data;
mod error;
mod likelihood;
pub mod stats;

pub use data::Dataset;
pub use error::{MlError, Result};
pub use likelihood::Likelihood;
