//! The raw patient record handed from the form to the encoder.

use crate::error::RecordError;
use crate::features::FieldId;
use serde::{Deserialize, Serialize};

/// One fully populated form submission in canonical dataset terms: numeric
/// values as entered, categorical values as the labels the encoders were fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub gender: String,
    /// Years
    pub age: f64,
    /// Meters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    pub family_history: String,
    pub high_calorie_food: String,
    /// Ordinal 1 (low) – 3 (high)
    pub vegetable_consumption: f64,
    pub main_meals: f64,
    pub snacking: String,
    pub smoking: String,
    /// Liters per day
    pub water_intake: f64,
    pub calorie_monitoring: String,
    /// Ordinal 0 (never) – 3 (frequent)
    pub physical_activity: f64,
    /// Hours per day on devices
    pub screen_time: f64,
    pub alcohol: String,
    pub transport: String,
}

/// Fields the form collects as whole numbers (integer sliders).
pub fn is_whole(field: FieldId) -> bool {
    matches!(field, FieldId::Age | FieldId::MainMeals)
}

/// Inclusive bounds accepted for a numeric field; `None` for categorical and derived fields.
pub fn numeric_range(field: FieldId) -> Option<(f64, f64)> {
    match field {
        FieldId::Age => Some((10.0, 100.0)),
        FieldId::Height => Some((1.0, 2.5)),
        FieldId::Weight => Some((30.0, 200.0)),
        FieldId::VegetableConsumption => Some((1.0, 3.0)),
        FieldId::MainMeals => Some((1.0, 4.0)),
        FieldId::WaterIntake => Some((1.0, 3.0)),
        FieldId::PhysicalActivity => Some((0.0, 3.0)),
        FieldId::ScreenTime => Some((0.0, 5.0)),
        _ => None,
    }
}

impl PatientRecord {
    pub fn categorical(&self, field: FieldId) -> Option<&str> {
        let v = match field {
            FieldId::Gender => &self.gender,
            FieldId::FamilyHistory => &self.family_history,
            FieldId::HighCalorieFood => &self.high_calorie_food,
            FieldId::Snacking => &self.snacking,
            FieldId::Smoking => &self.smoking,
            FieldId::CalorieMonitoring => &self.calorie_monitoring,
            FieldId::Alcohol => &self.alcohol,
            FieldId::Transport => &self.transport,
            _ => return None,
        };
        Some(v.as_str())
    }

    pub fn numeric(&self, field: FieldId) -> Option<f64> {
        match field {
            FieldId::Age => Some(self.age),
            FieldId::Height => Some(self.height),
            FieldId::Weight => Some(self.weight),
            FieldId::VegetableConsumption => Some(self.vegetable_consumption),
            FieldId::MainMeals => Some(self.main_meals),
            FieldId::WaterIntake => Some(self.water_intake),
            FieldId::PhysicalActivity => Some(self.physical_activity),
            FieldId::ScreenTime => Some(self.screen_time),
            FieldId::Bmi => Some(self.bmi()),
            _ => None,
        }
    }

    /// Body-mass index, kg/m².
    pub fn bmi(&self) -> f64 {
        self.weight / (self.height * self.height)
    }

    /// Every measured field finite, within its form bounds, and whole where the form
    /// only offers whole numbers.
    pub fn validate(&self) -> Result<(), RecordError> {
        for field in FieldId::ALL {
            let (Some((min, max)), Some(value)) = (numeric_range(field), self.numeric(field)) else {
                continue;
            };
            if !value.is_finite() || value < min || value > max {
                return Err(RecordError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
            if is_whole(field) && value.fract() != 0.0 {
                return Err(RecordError::NotWhole { field, value });
            }
        }
        Ok(())
    }
}
