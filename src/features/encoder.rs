//! Fitted label encoders for the categorical fields.

use super::FieldId;
use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Label ↔ code table fitted at training time. Code is the label's position
/// in `classes`, matching scikit-learn's `LabelEncoder.classes_`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains(&self, label: &str) -> bool {
        self.classes.iter().any(|c| c == label)
    }

    pub fn transform(&self, label: &str) -> Option<i64> {
        self.classes.iter().position(|c| c == label).map(|i| i as i64)
    }

    pub fn inverse_transform(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }

    /// Non-empty, no duplicate labels.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("no fitted classes".to_string());
        }
        let mut seen = HashSet::new();
        for c in &self.classes {
            if !seen.insert(c.as_str()) {
                return Err(format!("duplicate class {:?}", c));
            }
        }
        Ok(())
    }
}

/// Fitted encoders keyed by categorical field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCodeMap {
    tables: BTreeMap<FieldId, LabelEncoder>,
}

impl CategoryCodeMap {
    pub fn new(tables: BTreeMap<FieldId, LabelEncoder>) -> Self {
        Self { tables }
    }

    pub fn get(&self, field: FieldId) -> Option<&LabelEncoder> {
        self.tables.get(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.tables.keys().copied()
    }

    /// Every table belongs to a categorical field and is well formed.
    pub(crate) fn check(&self) -> Result<(), ArtifactError> {
        for (field, table) in &self.tables {
            if !field.is_categorical() {
                return Err(ArtifactError::Encoder {
                    field: *field,
                    reason: "field is numeric".to_string(),
                });
            }
            table.check().map_err(|reason| ArtifactError::Encoder {
                field: *field,
                reason,
            })?;
        }
        Ok(())
    }
}
