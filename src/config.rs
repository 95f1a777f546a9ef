//! Application configuration: where the trained artifacts live and how results are shown.

use crate::error::ConfigError;
use crate::prediction::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Trained artifact bundle (schema, scaler, encoders, target decoder, classifier)
    pub artifacts: ArtifactsConfig,
    /// Result display
    pub display: DisplayConfig,
    /// Form widget checks
    pub form: FormConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory the file names below are relative to
    pub dir: PathBuf,
    pub schema: PathBuf,
    pub scaler: PathBuf,
    pub encoders: PathBuf,
    pub target: PathBuf,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierFormat {
    Onnx,
    Linear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub format: ClassifierFormat,
    pub path: PathBuf,
    /// Input width for ONNX models with a dynamic input shape
    pub input_dim: Option<usize>,
    /// ONNX output holding the class labels (first output when unset)
    pub output_name: Option<String>,
    /// ONNX Runtime shared library (`ORT_DYLIB_PATH` or the system default when unset)
    pub runtime: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub locale: Locale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Refuse to start when a widget offers a value the fitted encoders do not know
    pub strict_choices: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            schema: PathBuf::from("schema.json"),
            scaler: PathBuf::from("scaler.json"),
            encoders: PathBuf::from("encoders.json"),
            target: PathBuf::from("target_encoder.json"),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            format: ClassifierFormat::Onnx,
            path: PathBuf::from("model.onnx"),
            input_dim: None,
            output_name: Some("label".to_string()),
            runtime: None,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { strict_choices: true }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ArtifactsConfig {
    /// Resolve an artifact file name against `dir`.
    pub fn path(&self, file: &Path) -> PathBuf {
        self.dir.join(file)
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but cannot be read or parsed is an error, never a silent default.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
