//! The seven-class obesity-level taxonomy and its display strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prediction target, declared in ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObesityLevel {
    #[serde(rename = "Insufficient_Weight")]
    InsufficientWeight,
    #[serde(rename = "Normal_Weight")]
    NormalWeight,
    #[serde(rename = "Overweight_Level_I")]
    OverweightLevelI,
    #[serde(rename = "Overweight_Level_II")]
    OverweightLevelII,
    #[serde(rename = "Obesity_Type_I")]
    ObesityTypeI,
    #[serde(rename = "Obesity_Type_II")]
    ObesityTypeII,
    #[serde(rename = "Obesity_Type_III")]
    ObesityTypeIII,
}

/// Language used for form option labels and result display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl ObesityLevel {
    pub const ALL: [ObesityLevel; 7] = [
        ObesityLevel::InsufficientWeight,
        ObesityLevel::NormalWeight,
        ObesityLevel::OverweightLevelI,
        ObesityLevel::OverweightLevelII,
        ObesityLevel::ObesityTypeI,
        ObesityLevel::ObesityTypeII,
        ObesityLevel::ObesityTypeIII,
    ];

    /// 0 (insufficient weight) through 6 (obesity type III).
    pub fn severity(self) -> u8 {
        self as u8
    }

    /// Label as it appears in the dataset's target column.
    pub fn canonical(self) -> &'static str {
        match self {
            ObesityLevel::InsufficientWeight => "Insufficient_Weight",
            ObesityLevel::NormalWeight => "Normal_Weight",
            ObesityLevel::OverweightLevelI => "Overweight_Level_I",
            ObesityLevel::OverweightLevelII => "Overweight_Level_II",
            ObesityLevel::ObesityTypeI => "Obesity_Type_I",
            ObesityLevel::ObesityTypeII => "Obesity_Type_II",
            ObesityLevel::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    pub fn display(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                ObesityLevel::InsufficientWeight => "Insufficient Weight",
                ObesityLevel::NormalWeight => "Normal Weight",
                ObesityLevel::OverweightLevelI => "Overweight Level I",
                ObesityLevel::OverweightLevelII => "Overweight Level II",
                ObesityLevel::ObesityTypeI => "Obesity Type I",
                ObesityLevel::ObesityTypeII => "Obesity Type II",
                ObesityLevel::ObesityTypeIII => "Obesity Type III",
            },
            Locale::PtBr => match self {
                ObesityLevel::InsufficientWeight => "Peso Insuficiente",
                ObesityLevel::NormalWeight => "Peso Normal",
                ObesityLevel::OverweightLevelI => "Sobrepeso Nível I",
                ObesityLevel::OverweightLevelII => "Sobrepeso Nível II",
                ObesityLevel::ObesityTypeI => "Obesidade Tipo I",
                ObesityLevel::ObesityTypeII => "Obesidade Tipo II",
                ObesityLevel::ObesityTypeIII => "Obesidade Tipo III",
            },
        }
    }
}

impl FromStr for ObesityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObesityLevel::ALL
            .into_iter()
            .find(|l| l.canonical() == s)
            .ok_or_else(|| format!("{:?} is not an obesity level", s))
    }
}

impl fmt::Display for ObesityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}
