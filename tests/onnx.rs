//! ONNX classifier against a skl2onnx-shaped export of the frozen linear model.
//! Inference tests need an ONNX Runtime library in `ORT_DYLIB_PATH` and are skipped without one.

mod common;

use common::{frozen_bundle, frozen_config, onnx_fixture, ort_runtime, scenario_one, scenario_two};
use ndarray::Array2;
use obesity_predictor::config::ClassifierFormat;
use obesity_predictor::error::ArtifactError;
use obesity_predictor::model::{Classifier, OnnxClassifier, OnnxOptions};
use obesity_predictor::ArtifactBundle;
use std::path::PathBuf;

fn with_runtime() -> Option<PathBuf> {
    let runtime = ort_runtime();
    if runtime.is_none() {
        eprintln!("ORT_DYLIB_PATH not set; skipping ONNX inference test");
    }
    runtime
}

#[test]
fn fixture_load_never_panics() {
    // Whatever the host has installed, a load either succeeds or reports why it could not.
    match OnnxClassifier::load(&onnx_fixture(), OnnxOptions::default()) {
        Ok(model) => assert_eq!(model.input_dim(), 16),
        Err(ArtifactError::OnnxRuntime { .. }) => {}
        Err(e) => panic!("unexpected load error: {}", e),
    }
}

#[test]
fn declared_width_and_classes_are_read_from_the_model() {
    let Some(runtime) = with_runtime() else { return };
    let options = OnnxOptions {
        output_name: Some("label"),
        runtime: Some(&runtime),
        ..Default::default()
    };
    let model = OnnxClassifier::load(&onnx_fixture(), options).unwrap();
    assert_eq!(model.input_dim(), 16);
    assert_eq!(model.n_classes(), Some(7));
}

#[test]
fn configured_width_must_agree_with_the_model() {
    let Some(runtime) = with_runtime() else { return };
    let agreeing = OnnxOptions {
        input_dim: Some(16),
        runtime: Some(&runtime),
        ..Default::default()
    };
    assert!(OnnxClassifier::load(&onnx_fixture(), agreeing).is_ok());

    let disagreeing = OnnxOptions {
        input_dim: Some(15),
        ..agreeing
    };
    assert!(matches!(
        OnnxClassifier::load(&onnx_fixture(), disagreeing),
        Err(ArtifactError::Classifier(_))
    ));
}

#[test]
fn unknown_output_name_is_a_load_error() {
    let Some(runtime) = with_runtime() else { return };
    let options = OnnxOptions {
        output_name: Some("output_label"),
        runtime: Some(&runtime),
        ..Default::default()
    };
    assert!(matches!(
        OnnxClassifier::load(&onnx_fixture(), options),
        Err(ArtifactError::Classifier(_))
    ));
}

#[test]
fn one_label_per_row() {
    let Some(runtime) = with_runtime() else { return };
    let options = OnnxOptions {
        output_name: Some("label"),
        runtime: Some(&runtime),
        ..Default::default()
    };
    let model = OnnxClassifier::load(&onnx_fixture(), options).unwrap();
    let frozen = frozen_bundle();
    let rows: Vec<f32> = [scenario_one(), scenario_two()]
        .iter()
        .flat_map(|r| frozen.encode(r).unwrap().as_slice().to_vec())
        .collect();
    let batch = Array2::from_shape_vec((2, 16), rows).unwrap();

    let onnx = model.predict(batch.view()).unwrap();
    let linear = frozen.predictor().classifier().predict(batch.view()).unwrap();
    assert_eq!(onnx.len(), 2);
    assert_eq!(onnx, linear);
}

#[test]
fn onnx_bundle_predicts_like_the_linear_bundle() {
    let Some(runtime) = with_runtime() else { return };
    let mut config = frozen_config();
    config.artifacts.classifier.format = ClassifierFormat::Onnx;
    config.artifacts.classifier.path = onnx_fixture();
    config.artifacts.classifier.output_name = Some("label".to_string());
    config.artifacts.classifier.runtime = Some(runtime);
    let bundle = ArtifactBundle::load(&config).unwrap();
    assert_eq!(bundle.predictor().classifier().name(), "onnx");

    let frozen = frozen_bundle();
    for record in [scenario_one(), scenario_two()] {
        assert_eq!(bundle.predict(&record).unwrap(), frozen.predict(&record).unwrap());
    }
}
