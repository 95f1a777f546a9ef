//! Encoding pipeline: record → fitted codes + scaled numerics → schema-ordered vector.

use super::{CategoryCodeMap, EncodedFeatureVector, FeatureSchema, NumericScaler, SlotKind};
use crate::error::{ArtifactError, PredictError};
use crate::form::PatientRecord;
use crate::features::FieldId;
use serde::Serialize;

/// One slot of an encoded vector, named by the dataset column it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureValue {
    pub field: FieldId,
    pub value: f32,
}

/// Where one slot's value comes from, resolved once at construction.
#[derive(Debug, Clone, Copy)]
enum SlotSource {
    Code(FieldId),
    Scaled(usize),
    Raw(FieldId),
}

/// Validated encoder over the fitted artifacts. Immutable after construction.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
    codes: CategoryCodeMap,
    scaler: NumericScaler,
    sources: Vec<SlotSource>,
    input_dim: usize,
}

impl FeatureEncoder {
    /// Build from artifacts; `input_dim` is the classifier's declared input width.
    pub fn new(
        schema: FeatureSchema,
        codes: CategoryCodeMap,
        scaler: NumericScaler,
        input_dim: usize,
    ) -> Result<Self, ArtifactError> {
        codes.check()?;
        scaler.check()?;
        schema.validate(&codes, &scaler)?;
        if schema.input_dim != input_dim {
            return Err(ArtifactError::Schema(format!(
                "schema declares {} inputs, classifier expects {}",
                schema.input_dim, input_dim
            )));
        }

        let mut sources = Vec::with_capacity(schema.len());
        for slot in &schema.slots {
            let source = match slot.kind {
                SlotKind::Categorical => SlotSource::Code(slot.field),
                SlotKind::Passthrough => SlotSource::Raw(slot.field),
                SlotKind::Scaled => {
                    let i = scaler.position(slot.field).ok_or_else(|| {
                        ArtifactError::Schema(format!("{} not fitted by scaler", slot.field))
                    })?;
                    SlotSource::Scaled(i)
                }
            };
            sources.push(source);
        }

        Ok(Self {
            schema,
            codes,
            scaler,
            sources,
            input_dim,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn codes(&self) -> &CategoryCodeMap {
        &self.codes
    }

    pub fn scaler(&self) -> &NumericScaler {
        &self.scaler
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Encode one record into the classifier's feature vector.
    pub fn encode(&self, record: &PatientRecord) -> Result<EncodedFeatureVector, PredictError> {
        // Raw numerics in the scaler's fitted order.
        let raw: Vec<f64> = self
            .scaler
            .feature_names()
            .iter()
            .map(|f| numeric(record, *f))
            .collect();
        let scaled = self
            .scaler
            .transform(&raw)
            .map_err(|actual| PredictError::FeatureDimension {
                expected: self.scaler.n_features(),
                actual,
            })?;

        let mut values = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let v = match *source {
                SlotSource::Code(field) => self.code(record, field)? as f32,
                SlotSource::Scaled(i) => scaled[i] as f32,
                SlotSource::Raw(field) => numeric(record, field) as f32,
            };
            values.push(v);
        }

        if values.len() != self.input_dim {
            return Err(PredictError::FeatureDimension {
                expected: self.input_dim,
                actual: values.len(),
            });
        }
        Ok(EncodedFeatureVector::from_values(values))
    }

    /// Pair each value of `vector` with its slot's column, for showing the model input.
    pub fn labelled(&self, vector: &EncodedFeatureVector) -> Vec<FeatureValue> {
        self.schema
            .slots
            .iter()
            .zip(vector.as_slice())
            .map(|(slot, &value)| FeatureValue { field: slot.field, value })
            .collect()
    }

    fn code(&self, record: &PatientRecord, field: FieldId) -> Result<i64, PredictError> {
        let label = record.categorical(field).unwrap_or_default();
        self.codes
            .get(field)
            .and_then(|table| table.transform(label))
            .ok_or_else(|| PredictError::UnknownCategory {
                field,
                label: label.to_string(),
            })
    }
}

// Only numeric fields reach here: schema validation rejects other slot kinds.
fn numeric(record: &PatientRecord, field: FieldId) -> f64 {
    record.numeric(field).unwrap_or(f64::NAN)
}
