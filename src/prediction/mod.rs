//! Prediction: classifier output → obesity level → display string.

mod engine;
mod level;

pub use engine::{PredictionResult, Predictor, TargetDecoder};
pub use level::{Locale, ObesityLevel};
