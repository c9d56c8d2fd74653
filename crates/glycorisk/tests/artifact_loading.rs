use std::fs;
use std::path::{Path, PathBuf};

use glycorisk::assessment::model::{
    ArtifactError, ScaledFeatureSource, DEFAULT_SCALED_FEATURES, FEATURE_NAMES_FILE, MODEL_FILE,
    SCALED_FEATURES_FILE, SCALER_FILE,
};
use glycorisk::assessment::{
    ArtifactBundle, AssessmentError, IncomeBrackets, ModelState, RiskCategory,
    StandardAssessmentService, UserProfile,
};
use serde_json::json;
use tempfile::TempDir;

fn shipped_artifacts() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

fn write(dir: &Path, name: &str, value: serde_json::Value) {
    fs::write(dir.join(name), value.to_string()).expect("artifact written");
}

fn minimal_bundle(dir: &Path) {
    write(dir, FEATURE_NAMES_FILE, json!(["HighBP", "BMI", "Age"]));
    write(
        dir,
        MODEL_FILE,
        json!({
            "intercept": -2.0,
            "coefficients": { "HighBP": 1.0, "BMI": 0.5, "Age": 0.25 }
        }),
    );
    write(
        dir,
        SCALER_FILE,
        json!({
            "feature_names": ["BMI", "Age"],
            "mean": [28.0, 8.0],
            "scale": [6.0, 3.0]
        }),
    );
}

#[test]
fn shipped_bundle_loads_and_scores() {
    let bundle = ArtifactBundle::load(shipped_artifacts()).expect("shipped artifacts load");
    assert_eq!(bundle.schema.len(), 21);
    assert_eq!(bundle.scaled_features_source, ScaledFeatureSource::Artifact);

    let service = StandardAssessmentService::new(ModelState::Ready(bundle), IncomeBrackets::default());
    let assessment = service
        .assess(&UserProfile::default())
        .expect("default profile is assessed");

    assert!((0.0..=1.0).contains(&assessment.raw_probability));
    assert!(assessment.final_probability >= assessment.raw_probability);
    assert!(assessment.warnings.is_empty());
}

#[test]
fn missing_scaled_feature_list_falls_back_to_defaults() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());

    let bundle = ArtifactBundle::load(dir.path()).expect("bundle loads");

    assert_eq!(bundle.scaled_features_source, ScaledFeatureSource::Fallback);
    assert_eq!(bundle.scaled_features, DEFAULT_SCALED_FEATURES.to_vec());
}

#[test]
fn explicit_scaled_feature_list_is_used() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());
    write(dir.path(), SCALED_FEATURES_FILE, json!(["BMI", "Age"]));

    let bundle = ArtifactBundle::load(dir.path()).expect("bundle loads");
    assert_eq!(bundle.scaled_features_source, ScaledFeatureSource::Artifact);

    let service = StandardAssessmentService::new(ModelState::Ready(bundle), IncomeBrackets::default());
    let assessment = service
        .assess(&UserProfile::default())
        .expect("assessment succeeds");
    assert!(assessment.warnings.is_empty());
}

#[test]
fn fallback_list_is_intersected_with_the_schema() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());

    let bundle = ArtifactBundle::load(dir.path()).expect("bundle loads");
    let service = StandardAssessmentService::new(ModelState::Ready(bundle), IncomeBrackets::default());

    let assessment = service
        .assess(&UserProfile::default())
        .expect("assessment succeeds");
    assert!(assessment.warnings.is_empty());
}

#[test]
fn scaled_list_out_of_scaler_order_only_warns() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());
    write(dir.path(), SCALED_FEATURES_FILE, json!(["Age", "BMI"]));

    let bundle = ArtifactBundle::load(dir.path()).expect("bundle loads");
    let service = StandardAssessmentService::new(ModelState::Ready(bundle), IncomeBrackets::default());

    let assessment = service
        .assess(&UserProfile::default())
        .expect("assessment still succeeds");
    assert_eq!(assessment.warnings.len(), 1);
}

#[test]
fn model_without_every_schema_coefficient_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());
    write(
        dir.path(),
        MODEL_FILE,
        json!({ "intercept": 0.0, "coefficients": { "HighBP": 1.0 } }),
    );

    match ArtifactBundle::load(dir.path()) {
        Err(ArtifactError::IncompatibleModel { missing }) => {
            assert_eq!(missing, vec!["BMI".to_string(), "Age".to_string()]);
        }
        other => panic!("expected incompatible model, got {other:?}"),
    }
}

#[test]
fn inconsistent_scaler_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());
    write(
        dir.path(),
        SCALER_FILE,
        json!({ "feature_names": ["BMI", "Age"], "mean": [28.0], "scale": [6.0, 3.0] }),
    );

    assert!(matches!(
        ArtifactBundle::load(dir.path()),
        Err(ArtifactError::InconsistentScaler { .. })
    ));
}

#[test]
fn missing_model_leaves_the_service_unavailable() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());
    fs::remove_file(dir.path().join(MODEL_FILE)).expect("model removed");

    let state = ModelState::from(ArtifactBundle::load(dir.path()));
    assert!(!state.is_ready());

    let service = StandardAssessmentService::new(state, IncomeBrackets::default());
    match service.assess(&UserProfile::default()) {
        Err(AssessmentError::ModelUnavailable { reason }) => {
            assert!(reason.contains(MODEL_FILE));
        }
        other => panic!("expected unavailable model, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    minimal_bundle(dir.path());
    fs::write(dir.path().join(FEATURE_NAMES_FILE), "[\"HighBP\",").expect("written");

    assert!(matches!(
        ArtifactBundle::load(dir.path()),
        Err(ArtifactError::Parse { .. })
    ));
}

#[test]
fn high_risk_profile_is_floored_with_shipped_model() {
    let bundle = ArtifactBundle::load(shipped_artifacts()).expect("shipped artifacts load");
    let service = StandardAssessmentService::new(ModelState::Ready(bundle), IncomeBrackets::default());

    let mut profile = UserProfile::default();
    profile.health.high_blood_pressure = true;
    profile.health.high_cholesterol = true;
    profile.health.heart_disease_or_attack = true;
    profile.weight_kg = 95.0;
    profile.height_cm = 170.0;

    let assessment = service.assess(&profile).expect("assessment succeeds");
    assert_eq!(assessment.risk_score, 10);
    assert!(assessment.final_probability >= 0.86);
    assert_eq!(assessment.category, RiskCategory::VeryHigh);
}
