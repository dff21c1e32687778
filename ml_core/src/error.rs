use std::{error::Error, fmt};

/// The result type used across the classifier crates.
pub type Result<T> = std::result::Result<T, MlError>;

/// Errors produced when the provided data violates a precondition.
#[derive(Debug, Clone, PartialEq)]
pub enum MlError {
    /// An operation received zero samples.
    EmptyInput { what: &'static str },

    /// Fewer samples than the statistic needs (e.g. a stdev over one value).
    InsufficientSamples {
        what: &'static str,
        got: usize,
        required: usize,
    },

    /// A feature vector has a different length than its siblings or the trained model.
    DimensionMismatch {
        /// Human-readable context for the mismatch (e.g. "row", "instance").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },

    /// Two sequences that should be parallel have different lengths.
    LengthMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },

    /// The likelihood is undefined for the given parameters (stdev == 0).
    UnknownLikelihoodDomain { value: f64, mean: f64 },

    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),
}

impl fmt::Display for MlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlError::EmptyInput { what } => write!(f, "empty input: {what} has no samples"),
            MlError::InsufficientSamples {
                what,
                got,
                required,
            } => write!(
                f,
                "insufficient samples for {what}: got {got}, at least {required} required"
            ),
            MlError::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got} features, expected {expected}"
            ),
            MlError::LengthMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "there's a length mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            MlError::UnknownLikelihoodDomain { value, mean } => write!(
                f,
                "likelihood undefined for value {value} around mean {mean} with zero stdev"
            ),
            MlError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for MlError {}
