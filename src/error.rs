//! Error taxonomy for artifact loading, form collection and prediction.

use crate::features::FieldId;
use std::path::PathBuf;

/// Failures of a single encode/predict call. None of these are retried and
/// none fall back to a default class.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// Label not in the fitted domain of the field's encoder (artifact/UI drift).
    #[error("unknown category {label:?} for field {field}")]
    UnknownCategory { field: FieldId, label: String },

    /// Assembled vector does not match the classifier's input dimensionality.
    #[error("feature vector has {actual} values, classifier expects {expected}")]
    FeatureDimension { expected: usize, actual: usize },

    /// Classifier emitted a code the target decoder was never fitted on.
    #[error("classifier emitted unknown class code {0}")]
    UnknownClassCode(i64),

    #[error("invalid patient record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
}

/// A numeric record field the form could never have produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Outside the declared bounds, or not finite.
    #[error("{field} = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: FieldId,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Fractional value for a field collected as a whole number.
    #[error("{field} = {value} is not a whole number")]
    NotWhole { field: FieldId, value: f64 },
}

impl RecordError {
    pub fn field(&self) -> FieldId {
        match self {
            RecordError::OutOfRange { field, .. } | RecordError::NotWhole { field, .. } => *field,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("onnx runtime: {0}")]
    Onnx(#[from] ort::Error),

    #[error("batch shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("batch has {actual} columns, model expects {expected}")]
    InputWidth { expected: usize, actual: usize },

    #[error("model produced no output {0:?}")]
    MissingOutput(String),

    #[error("model returned {actual} predictions for {expected} rows")]
    RowCount { expected: usize, actual: usize },
}

/// Errors raised while loading and cross-checking the artifact bundle.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature schema: {0}")]
    Schema(String),

    #[error("numeric scaler: {0}")]
    Scaler(String),

    #[error("category encoder for {field}: {reason}")]
    Encoder { field: FieldId, reason: String },

    #[error("target decoder: {0}")]
    Target(String),

    #[error("classifier: {0}")]
    Classifier(String),

    /// The ONNX Runtime shared library could not be found or loaded.
    #[error("onnx runtime {path}: {reason}")]
    OnnxRuntime { path: PathBuf, reason: String },

    #[error("onnx model {path}: {source}")]
    Onnx {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },

    #[error("form choices not covered by fitted encoders: {0}")]
    ChoiceDrift(String),
}

/// Form values the collector cannot turn into a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("widget {widget} has no option {choice:?}")]
    UnknownChoice { widget: &'static str, choice: String },

    #[error("slider value rejected: {0}")]
    Slider(#[from] RecordError),
}

/// A configuration file that exists but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
