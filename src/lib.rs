//! Obesity-level predictor: form record → trained-model feature vector → obesity class.
//!
//! Modular structure:
//! - [`form`]: Form collection, widget option tables, [`PatientRecord`]
//! - [`features`]: Feature schema, fitted encoders and scaler, vector encoding
//! - [`model`]: Trained classifiers (ONNX, linear)
//! - [`prediction`]: Class decoding and the seven-level taxonomy
//! - [`artifacts`]: Load-once artifact bundle with startup self-check
//! - [`logging`]: Structured JSON logging and report lines

pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod form;
pub mod logging;
pub mod model;
pub mod prediction;

pub use artifacts::ArtifactBundle;
pub use config::AppConfig;
pub use error::{ArtifactError, PredictError};
pub use features::{EncodedFeatureVector, FeatureEncoder, FieldId};
pub use form::{FormSubmission, PatientRecord};
pub use logging::StructuredLogger;
pub use model::Classifier;
pub use prediction::{ObesityLevel, PredictionResult, Predictor};
