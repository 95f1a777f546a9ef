//! Startup self-check against tampered artifact files.

mod common;

use common::{scenario_one, scratch_artifacts};
use obesity_predictor::{ArtifactBundle, ArtifactError, FieldId, PatientRecord, PredictError};

fn write(dir: &std::path::Path, file: &str, body: &str) {
    std::fs::write(dir.join(file), body).unwrap();
}

#[test]
fn encoder_missing_widget_value_is_drift() {
    let (dir, mut config) = scratch_artifacts();
    let encoders = std::fs::read_to_string(dir.path().join("encoders.json"))
        .unwrap()
        .replace("\"Motorbike\", ", "");
    write(dir.path(), "encoders.json", &encoders);

    match ArtifactBundle::load(&config) {
        Err(ArtifactError::ChoiceDrift(listed)) => assert_eq!(listed, "MTRANS=Motorbike"),
        Err(e) => panic!("expected drift, got {}", e),
        Ok(_) => panic!("expected drift"),
    }

    // Lenient mode loads, but the drifted value is still refused at encode time.
    config.form.strict_choices = false;
    let bundle = ArtifactBundle::load(&config).unwrap();
    let record = PatientRecord {
        transport: "Motorbike".into(),
        ..scenario_one()
    };
    assert!(matches!(
        bundle.predict(&record),
        Err(PredictError::UnknownCategory { field: FieldId::Transport, .. })
    ));
}

#[test]
fn schema_width_disagrees_with_model() {
    let (dir, config) = scratch_artifacts();
    let schema = std::fs::read_to_string(dir.path().join("schema.json"))
        .unwrap()
        .replace(",\n    { \"field\": \"MTRANS\", \"kind\": \"categorical\" }", "")
        .replace("\"input_dim\": 16", "\"input_dim\": 15");
    write(dir.path(), "schema.json", &schema);
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Schema(_))));
}

#[test]
fn duplicate_slot_rejected() {
    let (dir, config) = scratch_artifacts();
    let schema = std::fs::read_to_string(dir.path().join("schema.json"))
        .unwrap()
        .replace("{ \"field\": \"MTRANS\", \"kind\": \"categorical\" }", "{ \"field\": \"CALC\", \"kind\": \"categorical\" }");
    write(dir.path(), "schema.json", &schema);
    match ArtifactBundle::load(&config) {
        Err(ArtifactError::Schema(msg)) => assert!(msg.contains("CALC appears twice"), "{}", msg),
        _ => panic!("expected schema error"),
    }
}

#[test]
fn categorical_field_cannot_be_scaled() {
    let (dir, config) = scratch_artifacts();
    let schema = std::fs::read_to_string(dir.path().join("schema.json"))
        .unwrap()
        .replace("{ \"field\": \"SMOKE\", \"kind\": \"categorical\" }", "{ \"field\": \"SMOKE\", \"kind\": \"scaled\" }");
    write(dir.path(), "schema.json", &schema);
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Schema(_))));
}

#[test]
fn scaler_with_zero_scale() {
    let (dir, config) = scratch_artifacts();
    write(
        dir.path(),
        "scaler.json",
        r#"{"feature_names":["Age","Height","Weight","NCP","CH2O","TUE"],
            "mean":[24.3,1.7,86.6,2.7,2.0,0.66],"scale":[6.3,0.0,26.2,0.78,0.61,0.61]}"#,
    );
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Scaler(_))));
}

#[test]
fn scaler_missing_a_scaled_slot() {
    let (dir, config) = scratch_artifacts();
    write(
        dir.path(),
        "scaler.json",
        r#"{"feature_names":["Age","Height","Weight","NCP","CH2O"],
            "mean":[24.3,1.7,86.6,2.7,2.0],"scale":[6.3,0.09,26.2,0.78,0.61]}"#,
    );
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Schema(_))));
}

#[test]
fn duplicate_encoder_class() {
    let (dir, config) = scratch_artifacts();
    let encoders = std::fs::read_to_string(dir.path().join("encoders.json"))
        .unwrap()
        .replace("\"Gender\": [\"Female\", \"Male\"]", "\"Gender\": [\"Female\", \"Male\", \"Male\"]");
    write(dir.path(), "encoders.json", &encoders);
    assert!(matches!(
        ArtifactBundle::load(&config),
        Err(ArtifactError::Encoder { field: FieldId::Gender, .. })
    ));
}

#[test]
fn model_and_decoder_class_counts_differ() {
    let (dir, config) = scratch_artifacts();
    write(
        dir.path(),
        "linear_model.json",
        &format!(
            r#"{{"coefficients": [{row}, {row}], "intercepts": [0.0, 1.0]}}"#,
            row = format!("{:?}", vec![0.0f32; 16])
        ),
    );
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Classifier(_))));
}

#[test]
fn missing_artifact_file() {
    let (dir, config) = scratch_artifacts();
    std::fs::remove_file(dir.path().join("target_encoder.json")).unwrap();
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Io { .. })));
}

#[test]
fn malformed_json() {
    let (dir, config) = scratch_artifacts();
    write(dir.path(), "encoders.json", "{ not json");
    assert!(matches!(ArtifactBundle::load(&config), Err(ArtifactError::Json { .. })));
}

#[test]
fn fingerprint_tracks_file_content() {
    let (dir, config) = scratch_artifacts();
    let before = ArtifactBundle::load(&config).unwrap().fingerprints().clone();
    let encoders = std::fs::read_to_string(dir.path().join("encoders.json")).unwrap();
    write(dir.path(), "encoders.json", &format!("{}\n", encoders));
    let after = ArtifactBundle::load(&config).unwrap().fingerprints().clone();
    assert_ne!(before["encoders"], after["encoders"]);
    assert_eq!(before["classifier"], after["classifier"]);
}
