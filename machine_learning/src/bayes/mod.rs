mod gaussian;
mod model;
mod predictor;
mod summarizer;

pub use gaussian::{DegeneratePolicy, Gaussian};
pub use model::{FeatureSummary, Prediction, TrainedModel};
pub use predictor::{
    class_log_probability_single, class_probability, class_probability_single, predict,
    predict_log,
};
pub use summarizer::{fit, fit_one_class, split_by_class};
