//! Fitted standardization for the numeric fields.

use super::FieldId;
use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-feature affine transform `(raw - mean) / scale`, in fitted feature order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericScaler {
    feature_names: Vec<FieldId>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl NumericScaler {
    pub fn new(feature_names: Vec<FieldId>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        let scaler = Self {
            feature_names,
            mean,
            scale,
        };
        scaler.check()?;
        Ok(scaler)
    }

    /// Fitted feature order; `transform` expects raw values in this order.
    pub fn feature_names(&self) -> &[FieldId] {
        &self.feature_names
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn position(&self, field: FieldId) -> Option<usize> {
        self.feature_names.iter().position(|f| *f == field)
    }

    /// Standardize one row. No clipping, no rounding.
    pub fn transform(&self, raw: &[f64]) -> Result<Vec<f64>, usize> {
        if raw.len() != self.feature_names.len() {
            return Err(raw.len());
        }
        Ok(raw
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    pub(crate) fn check(&self) -> Result<(), ArtifactError> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err(ArtifactError::Scaler("no fitted features".to_string()));
        }
        if self.mean.len() != n || self.scale.len() != n {
            return Err(ArtifactError::Scaler(format!(
                "{} features but {} means and {} scales",
                n,
                self.mean.len(),
                self.scale.len()
            )));
        }
        let mut seen = HashSet::new();
        for (i, field) in self.feature_names.iter().enumerate() {
            if field.is_categorical() {
                return Err(ArtifactError::Scaler(format!("{} is categorical", field)));
            }
            if !seen.insert(*field) {
                return Err(ArtifactError::Scaler(format!("{} fitted twice", field)));
            }
            let (m, s) = (self.mean[i], self.scale[i]);
            if !m.is_finite() || !s.is_finite() || s == 0.0 {
                return Err(ArtifactError::Scaler(format!(
                    "{} has unusable mean {} / scale {}",
                    field, m, s
                )));
            }
        }
        Ok(())
    }
}
