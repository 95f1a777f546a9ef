//! Property tests over valid records drawn from the fitted domains and form ranges.

mod common;

use common::frozen_bundle;
use obesity_predictor::{ArtifactBundle, ObesityLevel, PatientRecord};
use proptest::prelude::*;
use proptest::sample::select;
use std::sync::OnceLock;

fn bundle() -> &'static ArtifactBundle {
    static BUNDLE: OnceLock<ArtifactBundle> = OnceLock::new();
    BUNDLE.get_or_init(frozen_bundle)
}

const GENDER: &[&str] = &["Male", "Female"];
const YES_NO: &[&str] = &["yes", "no"];
const FREQUENCY: &[&str] = &["no", "Sometimes", "Frequently", "Always"];
const TRANSPORT: &[&str] = &["Automobile", "Motorbike", "Bike", "Public_Transportation", "Walking"];

prop_compose! {
    fn labels()(
        gender in select(GENDER),
        family_history in select(YES_NO),
        high_calorie_food in select(YES_NO),
        snacking in select(FREQUENCY),
        smoking in select(YES_NO),
        calorie_monitoring in select(YES_NO),
        alcohol in select(FREQUENCY),
        transport in select(TRANSPORT),
    ) -> [&'static str; 8] {
        [gender, family_history, high_calorie_food, snacking, smoking, calorie_monitoring, alcohol, transport]
    }
}

prop_compose! {
    fn valid_record()(
        l in labels(),
        age in 10u32..=100,
        height in 1.0f64..=2.5,
        weight in 30.0f64..=200.0,
        vegetable_consumption in 1u8..=3,
        main_meals in 1u8..=4,
        water_intake in 1.0f64..=3.0,
        physical_activity in 0u8..=3,
        screen_time in 0.0f64..=5.0,
    ) -> PatientRecord {
        PatientRecord {
            gender: l[0].into(),
            age: f64::from(age),
            height,
            weight,
            family_history: l[1].into(),
            high_calorie_food: l[2].into(),
            vegetable_consumption: f64::from(vegetable_consumption),
            main_meals: f64::from(main_meals),
            snacking: l[3].into(),
            smoking: l[4].into(),
            water_intake,
            calorie_monitoring: l[5].into(),
            physical_activity: f64::from(physical_activity),
            screen_time,
            alcohol: l[6].into(),
            transport: l[7].into(),
        }
    }
}

proptest! {
    #[test]
    fn vector_width_matches_classifier(record in valid_record()) {
        let v = bundle().encode(&record).unwrap();
        prop_assert_eq!(v.len(), bundle().predictor().classifier().input_dim());
    }

    #[test]
    fn encoding_is_deterministic(record in valid_record()) {
        let a = bundle().encode(&record).unwrap();
        let b = bundle().encode(&record).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_valid_record_gets_a_level(record in valid_record()) {
        let result = bundle().predict(&record).unwrap();
        prop_assert!(ObesityLevel::ALL.contains(&result.level));
        prop_assert_eq!(result.label.as_str(), result.level.canonical());
    }

    #[test]
    fn more_weight_never_lowers_severity(record in valid_record(), extra in 0.0f64..=170.0) {
        let heavier = PatientRecord { weight: (record.weight + extra).min(200.0), ..record.clone() };
        let a = bundle().predict(&record).unwrap();
        let b = bundle().predict(&heavier).unwrap();
        prop_assert!(b.level >= a.level);
    }

    #[test]
    fn unknown_labels_never_encode(record in valid_record(), label in "[a-z]{1,12}") {
        prop_assume!(label != "yes" && label != "no");
        let bad = PatientRecord { smoking: label, ..record };
        prop_assert!(bundle().encode(&bad).is_err());
    }
}
