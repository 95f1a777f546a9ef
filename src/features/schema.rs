//! Explicit ordered feature layout the classifier was trained on.

use super::{CategoryCodeMap, FieldId, NumericScaler};
use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Label encoded through the field's fitted table.
    Categorical,
    /// Standardized through the numeric scaler.
    Scaled,
    /// Raw numeric value (ordinal fields the model saw unscaled).
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSlot {
    pub field: FieldId,
    pub kind: SlotKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Input width the classifier declares.
    pub input_dim: usize,
    pub slots: Vec<FeatureSlot>,
}

impl FeatureSchema {
    /// Column layout of the survey dataset as the bundled models were trained:
    /// categorical codes and numerics interleaved in dataset column order,
    /// FCVC and FAF left unscaled.
    pub fn survey_default() -> Self {
        use FieldId::*;
        let slot = |field, kind| FeatureSlot { field, kind };
        let slots = vec![
            slot(Gender, SlotKind::Categorical),
            slot(Age, SlotKind::Scaled),
            slot(Height, SlotKind::Scaled),
            slot(Weight, SlotKind::Scaled),
            slot(FamilyHistory, SlotKind::Categorical),
            slot(HighCalorieFood, SlotKind::Categorical),
            slot(VegetableConsumption, SlotKind::Passthrough),
            slot(MainMeals, SlotKind::Scaled),
            slot(Snacking, SlotKind::Categorical),
            slot(Smoking, SlotKind::Categorical),
            slot(WaterIntake, SlotKind::Scaled),
            slot(CalorieMonitoring, SlotKind::Categorical),
            slot(PhysicalActivity, SlotKind::Passthrough),
            slot(ScreenTime, SlotKind::Scaled),
            slot(Alcohol, SlotKind::Categorical),
            slot(Transport, SlotKind::Categorical),
        ];
        Self {
            input_dim: slots.len(),
            slots,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record fields the layout leaves out.
    pub fn unused_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .iter()
            .copied()
            .filter(|f| *f != FieldId::Bmi && !self.slots.iter().any(|s| s.field == *f))
            .collect()
    }

    /// Cross-check the layout against the fitted encoders and scaler.
    pub fn validate(&self, codes: &CategoryCodeMap, scaler: &NumericScaler) -> Result<(), ArtifactError> {
        if self.slots.len() != self.input_dim {
            return Err(ArtifactError::Schema(format!(
                "{} slots but input_dim {}",
                self.slots.len(),
                self.input_dim
            )));
        }

        let mut seen = BTreeSet::new();
        for slot in &self.slots {
            if !seen.insert(slot.field) {
                return Err(ArtifactError::Schema(format!("{} appears twice", slot.field)));
            }
            let compatible = match slot.kind {
                SlotKind::Categorical => slot.field.is_categorical(),
                SlotKind::Scaled | SlotKind::Passthrough => !slot.field.is_categorical(),
            };
            if !compatible {
                return Err(ArtifactError::Schema(format!(
                    "{} cannot be a {:?} slot",
                    slot.field, slot.kind
                )));
            }
        }

        let categorical: BTreeSet<FieldId> = self
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Categorical)
            .map(|s| s.field)
            .collect();
        let tables: BTreeSet<FieldId> = codes.fields().collect();
        if let Some(missing) = categorical.difference(&tables).next() {
            return Err(ArtifactError::Schema(format!("no fitted encoder for {}", missing)));
        }
        if let Some(orphan) = tables.difference(&categorical).next() {
            return Err(ArtifactError::Schema(format!(
                "encoder for {} has no categorical slot",
                orphan
            )));
        }

        let scaled: BTreeSet<FieldId> = self
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Scaled)
            .map(|s| s.field)
            .collect();
        let fitted: BTreeSet<FieldId> = scaler.feature_names().iter().copied().collect();
        if scaled != fitted {
            return Err(ArtifactError::Schema(format!(
                "scaled slots {:?} differ from scaler features {:?}",
                scaled, fitted
            )));
        }
        Ok(())
    }
}
