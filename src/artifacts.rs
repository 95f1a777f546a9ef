//! The trained artifact bundle: loaded once at startup, cross-checked, read-only afterwards.

use crate::config::{AppConfig, ClassifierFormat};
use crate::error::{ArtifactError, PredictError};
use crate::features::{CategoryCodeMap, EncodedFeatureVector, FeatureEncoder, FeatureSchema, LabelEncoder, NumericScaler};
use crate::form::{check_choices, PatientRecord};
use crate::model::{Classifier, LinearClassifier, OnnxClassifier, OnnxOptions};
use crate::prediction::{PredictionResult, Predictor, TargetDecoder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
struct TargetFile {
    classes: Vec<String>,
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let data = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Hex SHA-256 of a file, used to tell artifact versions apart in logs and reports.
pub fn fingerprint(path: &Path) -> Result<String, ArtifactError> {
    let data = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(format!("{:x}", Sha256::digest(&data)))
}

/// Encoder + predictor over one consistent set of trained artifacts.
/// Shared read-only for the process lifetime; there is no reload in place.
pub struct ArtifactBundle {
    encoder: FeatureEncoder,
    predictor: Predictor,
    fingerprints: BTreeMap<String, String>,
}

impl ArtifactBundle {
    /// Read every artifact named by `config.artifacts` and run the startup self-check.
    pub fn load(config: &AppConfig) -> Result<Self, ArtifactError> {
        let a = &config.artifacts;
        let files = [
            ("schema", a.path(&a.schema)),
            ("scaler", a.path(&a.scaler)),
            ("encoders", a.path(&a.encoders)),
            ("target", a.path(&a.target)),
            ("classifier", a.path(&a.classifier.path)),
        ];
        let mut fingerprints = BTreeMap::new();
        for (name, path) in &files {
            let digest = fingerprint(path)?;
            info!(artifact = *name, path = %path.display(), sha256 = %digest, "artifact");
            fingerprints.insert(name.to_string(), digest);
        }

        let schema: FeatureSchema = read_json(&files[0].1)?;
        let scaler: NumericScaler = read_json(&files[1].1)?;
        let codes: CategoryCodeMap = read_json(&files[2].1)?;
        let target: TargetFile = read_json(&files[3].1)?;
        let decoder = TargetDecoder::new(LabelEncoder::new(target.classes))?;

        let classifier: Box<dyn Classifier> = match a.classifier.format {
            ClassifierFormat::Onnx => {
                let options = OnnxOptions {
                    input_dim: a.classifier.input_dim,
                    output_name: a.classifier.output_name.as_deref(),
                    runtime: a.classifier.runtime.as_deref(),
                };
                Box::new(OnnxClassifier::load(&files[4].1, options)?)
            }
            ClassifierFormat::Linear => Box::new(LinearClassifier::load(&files[4].1)?),
        };

        let mut bundle = Self::from_parts(schema, codes, scaler, classifier, decoder, config)?;
        bundle.fingerprints = fingerprints;
        Ok(bundle)
    }

    /// Assemble from already-loaded artifacts, running the same checks as [`ArtifactBundle::load`].
    pub fn from_parts(
        schema: FeatureSchema,
        codes: CategoryCodeMap,
        scaler: NumericScaler,
        classifier: Box<dyn Classifier>,
        decoder: TargetDecoder,
        config: &AppConfig,
    ) -> Result<Self, ArtifactError> {
        if let Some(n) = classifier.n_classes() {
            if n != decoder.n_classes() {
                return Err(ArtifactError::Classifier(format!(
                    "{} classes in model, {} in target decoder",
                    n,
                    decoder.n_classes()
                )));
            }
        }
        let encoder = FeatureEncoder::new(schema, codes, scaler, classifier.input_dim())?;

        let drift = check_choices(encoder.codes());
        if !drift.is_empty() {
            let listed = drift
                .iter()
                .map(|d| format!("{}={}", d.field, d.value))
                .collect::<Vec<_>>()
                .join(", ");
            if config.form.strict_choices {
                return Err(ArtifactError::ChoiceDrift(listed));
            }
            warn!(choices = %listed, "form offers values the encoders were not fitted on");
        }

        let unused = encoder.schema().unused_fields();
        if !unused.is_empty() {
            info!(fields = ?unused, "record fields not used by this model");
        }
        info!(
            input_dim = encoder.input_dim(),
            model = classifier.name(),
            classes = decoder.n_classes(),
            "artifact bundle ready"
        );

        Ok(Self {
            encoder,
            predictor: Predictor::new(classifier, decoder, config.display.locale),
            fingerprints: BTreeMap::new(),
        })
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// SHA-256 per artifact file, keyed by role (`schema`, `scaler`, ..., `classifier`).
    pub fn fingerprints(&self) -> &BTreeMap<String, String> {
        &self.fingerprints
    }

    pub fn encode(&self, record: &PatientRecord) -> Result<EncodedFeatureVector, PredictError> {
        self.encoder.encode(record)
    }

    /// Validate, encode and predict one record.
    pub fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, PredictError> {
        self.predict_with_features(record).map(|(_, result)| result)
    }

    /// As [`ArtifactBundle::predict`], also returning the vector the classifier saw.
    pub fn predict_with_features(
        &self,
        record: &PatientRecord,
    ) -> Result<(EncodedFeatureVector, PredictionResult), PredictError> {
        record.validate()?;
        let vector = self.encoder.encode(record)?;
        let result = self.predictor.predict(&vector)?;
        Ok((vector, result))
    }
}
