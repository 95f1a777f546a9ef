//! Runs the classifier on one encoded vector and decodes the class code into a level.

use super::{Locale, ObesityLevel};
use crate::error::{ArtifactError, ClassifierError, PredictError};
use crate::features::{EncodedFeatureVector, LabelEncoder};
use crate::model::Classifier;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fitted target encoder, checked to cover exactly the seven canonical levels.
#[derive(Debug, Clone)]
pub struct TargetDecoder {
    encoder: LabelEncoder,
    levels: Vec<ObesityLevel>,
}

impl TargetDecoder {
    pub fn new(encoder: LabelEncoder) -> Result<Self, ArtifactError> {
        encoder.check().map_err(ArtifactError::Target)?;
        let levels = encoder
            .classes()
            .iter()
            .map(|c| c.parse::<ObesityLevel>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(ArtifactError::Target)?;
        let distinct: HashSet<ObesityLevel> = levels.iter().copied().collect();
        if distinct.len() != ObesityLevel::ALL.len() {
            return Err(ArtifactError::Target(format!(
                "fitted on {} of {} levels",
                distinct.len(),
                ObesityLevel::ALL.len()
            )));
        }
        Ok(Self { encoder, levels })
    }

    pub fn n_classes(&self) -> usize {
        self.levels.len()
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn decode(&self, code: i64) -> Result<ObesityLevel, PredictError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.levels.get(i))
            .copied()
            .ok_or(PredictError::UnknownClassCode(code))
    }
}

/// Outcome of one prediction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub class_code: i64,
    pub level: ObesityLevel,
    pub label: String,
    pub display: String,
}

/// Classifier plus target decoder. Stateless across calls.
pub struct Predictor {
    classifier: Box<dyn Classifier>,
    decoder: TargetDecoder,
    locale: Locale,
}

impl Predictor {
    pub fn new(classifier: Box<dyn Classifier>, decoder: TargetDecoder, locale: Locale) -> Self {
        Self {
            classifier,
            decoder,
            locale,
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn decoder(&self) -> &TargetDecoder {
        &self.decoder
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Predict the level for one vector. A vector of the wrong width never reaches the model.
    pub fn predict(&self, vector: &EncodedFeatureVector) -> Result<PredictionResult, PredictError> {
        let expected = self.classifier.input_dim();
        if vector.len() != expected {
            return Err(PredictError::FeatureDimension {
                expected,
                actual: vector.len(),
            });
        }

        let batch = ArrayView2::from_shape((1, expected), vector.as_slice()).map_err(ClassifierError::from)?;
        let codes = self.classifier.predict(batch)?;
        let code = match codes.as_slice() {
            [code] => *code,
            _ => {
                return Err(ClassifierError::RowCount {
                    expected: 1,
                    actual: codes.len(),
                }
                .into())
            }
        };

        let level = self.decoder.decode(code)?;
        tracing::debug!(model = self.classifier.name(), code, level = %level, "prediction");
        Ok(PredictionResult {
            class_code: code,
            level,
            label: level.canonical().to_string(),
            display: level.display(self.locale).to_string(),
        })
    }
}
