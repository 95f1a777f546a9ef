//! Shared fixtures: the frozen artifact set under `artifacts/` and the reference records.

#![allow(dead_code)]

use obesity_predictor::config::{AppConfig, ClassifierConfig, ClassifierFormat};
use obesity_predictor::error::ClassifierError;
use obesity_predictor::model::Classifier;
use obesity_predictor::{ArtifactBundle, PatientRecord};
use ndarray::ArrayView2;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts")
}

pub fn frozen_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.artifacts.dir = artifacts_dir();
    config.artifacts.classifier = ClassifierConfig {
        format: ClassifierFormat::Linear,
        path: PathBuf::from("linear_model.json"),
        input_dim: None,
        output_name: None,
        runtime: None,
    };
    config
}

/// Frozen linear model exported to ONNX the way skl2onnx lays out classifiers:
/// `input` [N, 16] f32 in, `label` [N] int64 and `probabilities` [N, 7] out.
pub fn onnx_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/linear16.onnx")
}

/// ONNX Runtime library for tests that run real inference; they are skipped without one.
pub fn ort_runtime() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var_os("ORT_DYLIB_PATH")?);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

pub fn frozen_bundle() -> ArtifactBundle {
    ArtifactBundle::load(&frozen_config()).unwrap()
}

/// sex Male, 30 y, 1.70 m, 70 kg, family history, moderate activity, public transport.
pub fn scenario_one() -> PatientRecord {
    PatientRecord {
        gender: "Male".into(),
        age: 30.0,
        height: 1.70,
        weight: 70.0,
        family_history: "yes".into(),
        high_calorie_food: "no".into(),
        vegetable_consumption: 2.0,
        main_meals: 3.0,
        snacking: "Sometimes".into(),
        smoking: "no".into(),
        water_intake: 2.0,
        calorie_monitoring: "no".into(),
        physical_activity: 2.0,
        screen_time: 2.0,
        alcohol: "Sometimes".into(),
        transport: "Public_Transportation".into(),
    }
}

pub fn scenario_two() -> PatientRecord {
    PatientRecord {
        weight: 200.0,
        ..scenario_one()
    }
}

/// Classifier stub that returns a fixed code and counts how often it was asked.
pub struct FixedClassifier {
    pub dim: usize,
    pub code: i64,
    pub calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(dim: usize, code: i64) -> Self {
        Self {
            dim,
            code,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![self.code; batch.nrows()])
    }
}

/// Copy the frozen artifact set into a scratch directory so a test can tamper with one file.
pub fn scratch_artifacts() -> (tempfile::TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    for entry in std::fs::read_dir(artifacts_dir()).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    let mut config = frozen_config();
    config.artifacts.dir = dir.path().to_path_buf();
    (dir, config)
}
