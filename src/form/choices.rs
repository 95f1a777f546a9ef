//! Widget option tables: what the form offers and the canonical value each option stands for.

use crate::error::FormError;
use crate::features::{CategoryCodeMap, FieldId};
use crate::prediction::Locale;

#[derive(Debug, Clone, Copy)]
pub struct Choice<V> {
    pub en: &'static str,
    pub pt_br: &'static str,
    pub value: V,
}

impl<V> Choice<V> {
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::PtBr => self.pt_br,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Widget<V: 'static> {
    pub name: &'static str,
    pub field: FieldId,
    pub options: &'static [Choice<V>],
}

impl<V: Copy + 'static> Widget<V> {
    /// Canonical value behind the option labelled `choice` in `locale`.
    pub fn select(&self, locale: Locale, choice: &str) -> Result<V, FormError> {
        self.options
            .iter()
            .find(|c| c.label(locale) == choice)
            .map(|c| c.value)
            .ok_or_else(|| FormError::UnknownChoice {
                widget: self.name,
                choice: choice.to_string(),
            })
    }

    pub fn labels(&self, locale: Locale) -> Vec<&'static str> {
        self.options.iter().map(|c| c.label(locale)).collect()
    }
}

const fn c<V>(en: &'static str, pt_br: &'static str, value: V) -> Choice<V> {
    Choice { en, pt_br, value }
}

const YES_NO: &[Choice<&str>] = &[c("Yes", "Sim", "yes"), c("No", "Não", "no")];

const FREQUENCY: &[Choice<&str>] = &[
    c("No", "Não", "no"),
    c("Sometimes", "Às vezes", "Sometimes"),
    c("Frequently", "Frequente", "Frequently"),
    c("Always", "Sempre", "Always"),
];

pub const GENDER: Widget<&str> = Widget {
    name: "gender",
    field: FieldId::Gender,
    options: &[c("Male", "Masculino", "Male"), c("Female", "Feminino", "Female")],
};

pub const FAMILY_HISTORY: Widget<&str> = Widget {
    name: "family_history",
    field: FieldId::FamilyHistory,
    options: YES_NO,
};

pub const HIGH_CALORIE_FOOD: Widget<&str> = Widget {
    name: "high_calorie_food",
    field: FieldId::HighCalorieFood,
    options: YES_NO,
};

pub const SNACKING: Widget<&str> = Widget {
    name: "snacking",
    field: FieldId::Snacking,
    options: FREQUENCY,
};

pub const SMOKING: Widget<&str> = Widget {
    name: "smoking",
    field: FieldId::Smoking,
    options: YES_NO,
};

pub const CALORIE_MONITORING: Widget<&str> = Widget {
    name: "calorie_monitoring",
    field: FieldId::CalorieMonitoring,
    options: YES_NO,
};

pub const ALCOHOL: Widget<&str> = Widget {
    name: "alcohol",
    field: FieldId::Alcohol,
    options: FREQUENCY,
};

pub const TRANSPORT: Widget<&str> = Widget {
    name: "transport",
    field: FieldId::Transport,
    options: &[
        c("Automobile", "Automóvel", "Automobile"),
        c("Motorbike", "Motocicleta", "Motorbike"),
        c("Bike", "Bicicleta", "Bike"),
        c("Public Transportation", "Transporte Público", "Public_Transportation"),
        c("Walking", "Caminhada", "Walking"),
    ],
};

pub const PHYSICAL_ACTIVITY: Widget<f64> = Widget {
    name: "physical_activity",
    field: FieldId::PhysicalActivity,
    options: &[
        c("Never", "Nunca", 0.0),
        c("Very little", "Pouquíssima", 1.0),
        c("Moderate", "Moderada", 2.0),
        c("Frequent", "Frequente", 3.0),
    ],
};

pub const VEGETABLE_CONSUMPTION: Widget<f64> = Widget {
    name: "vegetable_consumption",
    field: FieldId::VegetableConsumption,
    options: &[c("Low", "Baixo", 1.0), c("Medium", "Médio", 2.0), c("High", "Alto", 3.0)],
};

pub const CATEGORICAL_WIDGETS: [Widget<&str>; 8] = [
    GENDER,
    FAMILY_HISTORY,
    HIGH_CALORIE_FOOD,
    SNACKING,
    SMOKING,
    CALORIE_MONITORING,
    ALCOHOL,
    TRANSPORT,
];

/// A canonical value a widget offers that the field's fitted encoder does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceDrift {
    pub field: FieldId,
    pub value: &'static str,
}

/// List widget options outside the fitted domains. Fields without an encoder
/// (not used by the model) are skipped.
pub fn check_choices(codes: &CategoryCodeMap) -> Vec<ChoiceDrift> {
    let mut drift = Vec::new();
    for widget in CATEGORICAL_WIDGETS {
        let Some(table) = codes.get(widget.field) else {
            continue;
        };
        for option in widget.options {
            if !table.contains(option.value) {
                drift.push(ChoiceDrift {
                    field: widget.field,
                    value: option.value,
                });
            }
        }
    }
    drift
}
