//! Feature encoding: patient record → categorical codes + standardized numerics → model vector.

mod encoder;
mod pipeline;
mod scaler;
mod schema;

pub use encoder::{CategoryCodeMap, LabelEncoder};
pub use pipeline::{FeatureEncoder, FeatureValue};
pub use scaler::NumericScaler;
pub use schema::{FeatureSchema, FeatureSlot, SlotKind};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of record attributes a model may be trained on. Serialized under
/// the dataset column names so artifact files read like the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Gender,
    Age,
    Height,
    Weight,
    #[serde(rename = "family_history")]
    FamilyHistory,
    #[serde(rename = "FAVC")]
    HighCalorieFood,
    #[serde(rename = "FCVC")]
    VegetableConsumption,
    #[serde(rename = "NCP")]
    MainMeals,
    #[serde(rename = "CAEC")]
    Snacking,
    #[serde(rename = "SMOKE")]
    Smoking,
    #[serde(rename = "CH2O")]
    WaterIntake,
    #[serde(rename = "SCC")]
    CalorieMonitoring,
    #[serde(rename = "FAF")]
    PhysicalActivity,
    #[serde(rename = "TUE")]
    ScreenTime,
    #[serde(rename = "CALC")]
    Alcohol,
    #[serde(rename = "MTRANS")]
    Transport,
    /// Derived: weight / height².
    #[serde(rename = "BMI")]
    Bmi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Categorical,
    Numeric,
}

impl FieldId {
    pub const ALL: [FieldId; 17] = [
        FieldId::Gender,
        FieldId::Age,
        FieldId::Height,
        FieldId::Weight,
        FieldId::FamilyHistory,
        FieldId::HighCalorieFood,
        FieldId::VegetableConsumption,
        FieldId::MainMeals,
        FieldId::Snacking,
        FieldId::Smoking,
        FieldId::WaterIntake,
        FieldId::CalorieMonitoring,
        FieldId::PhysicalActivity,
        FieldId::ScreenTime,
        FieldId::Alcohol,
        FieldId::Transport,
        FieldId::Bmi,
    ];

    /// Column name in the reference dataset and in artifact files.
    pub fn column(self) -> &'static str {
        match self {
            FieldId::Gender => "Gender",
            FieldId::Age => "Age",
            FieldId::Height => "Height",
            FieldId::Weight => "Weight",
            FieldId::FamilyHistory => "family_history",
            FieldId::HighCalorieFood => "FAVC",
            FieldId::VegetableConsumption => "FCVC",
            FieldId::MainMeals => "NCP",
            FieldId::Snacking => "CAEC",
            FieldId::Smoking => "SMOKE",
            FieldId::WaterIntake => "CH2O",
            FieldId::CalorieMonitoring => "SCC",
            FieldId::PhysicalActivity => "FAF",
            FieldId::ScreenTime => "TUE",
            FieldId::Alcohol => "CALC",
            FieldId::Transport => "MTRANS",
            FieldId::Bmi => "BMI",
        }
    }

    pub fn field_type(self) -> FieldType {
        match self {
            FieldId::Gender
            | FieldId::FamilyHistory
            | FieldId::HighCalorieFood
            | FieldId::Snacking
            | FieldId::Smoking
            | FieldId::CalorieMonitoring
            | FieldId::Alcohol
            | FieldId::Transport => FieldType::Categorical,
            FieldId::Age
            | FieldId::Height
            | FieldId::Weight
            | FieldId::VegetableConsumption
            | FieldId::MainMeals
            | FieldId::WaterIntake
            | FieldId::PhysicalActivity
            | FieldId::ScreenTime
            | FieldId::Bmi => FieldType::Numeric,
        }
    }

    pub fn is_categorical(self) -> bool {
        self.field_type() == FieldType::Categorical
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Model input for one prediction, in the exact slot order of the feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    values: Vec<f32>,
}

impl EncodedFeatureVector {
    /// Wrap pre-assembled values. The predictor still checks the length
    /// against the classifier before using them.
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
