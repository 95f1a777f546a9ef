//! Form collection: widget selections and slider values → [`PatientRecord`].

mod choices;
mod record;

pub use choices::{check_choices, Choice, ChoiceDrift, Widget, CATEGORICAL_WIDGETS};
pub use choices::{
    ALCOHOL, CALORIE_MONITORING, FAMILY_HISTORY, GENDER, HIGH_CALORIE_FOOD, PHYSICAL_ACTIVITY, SMOKING, SNACKING,
    TRANSPORT, VEGETABLE_CONSUMPTION,
};
pub use record::{is_whole, numeric_range, PatientRecord};

use crate::error::FormError;
use crate::prediction::Locale;
use serde::{Deserialize, Serialize};

/// What the form hands over on submit: option labels as displayed in `locale`
/// and slider values as set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub locale: Locale,
    pub gender: String,
    pub family_history: String,
    pub high_calorie_food: String,
    pub snacking: String,
    pub smoking: String,
    pub calorie_monitoring: String,
    pub alcohol: String,
    pub transport: String,
    pub physical_activity: String,
    pub vegetable_consumption: String,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub main_meals: f64,
    pub water_intake: f64,
    pub screen_time: f64,
}

impl FormSubmission {
    pub fn into_record(&self) -> Result<PatientRecord, FormError> {
        let l = self.locale;
        let record = PatientRecord {
            gender: GENDER.select(l, &self.gender)?.to_string(),
            age: self.age,
            height: self.height,
            weight: self.weight,
            family_history: FAMILY_HISTORY.select(l, &self.family_history)?.to_string(),
            high_calorie_food: HIGH_CALORIE_FOOD.select(l, &self.high_calorie_food)?.to_string(),
            vegetable_consumption: VEGETABLE_CONSUMPTION.select(l, &self.vegetable_consumption)?,
            main_meals: self.main_meals,
            snacking: SNACKING.select(l, &self.snacking)?.to_string(),
            smoking: SMOKING.select(l, &self.smoking)?.to_string(),
            water_intake: self.water_intake,
            calorie_monitoring: CALORIE_MONITORING.select(l, &self.calorie_monitoring)?.to_string(),
            physical_activity: PHYSICAL_ACTIVITY.select(l, &self.physical_activity)?,
            screen_time: self.screen_time,
            alcohol: ALCOHOL.select(l, &self.alcohol)?.to_string(),
            transport: TRANSPORT.select(l, &self.transport)?.to_string(),
        };
        record.validate()?;
        Ok(record)
    }
}
