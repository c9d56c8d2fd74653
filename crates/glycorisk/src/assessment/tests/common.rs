use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::features::{FeatureSchema, FeatureVector};
use crate::assessment::mapping::IncomeBrackets;
use crate::assessment::model::{
    ArtifactBundle, Classifier, ClassifierError, FeatureScaler, ModelState, ScalingError,
    DEFAULT_SCALED_FEATURES,
};
use crate::assessment::profile::UserProfile;
use crate::assessment::service::RiskAssessmentService;

/// Returns the same probability for every vector.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClassifier(pub f64);

impl Classifier for FixedClassifier {
    fn predict_probability(&self, _features: &FeatureVector) -> Result<f64, ClassifierError> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        Err(ClassifierError::FeatureMismatch {
            expected: "HighBP".to_string(),
            actual: features.names().collect::<Vec<_>>().join(", "),
        })
    }
}

/// Halves every value so tests can tell scaled columns apart.
#[derive(Debug, Clone, Copy)]
pub(super) struct HalvingScaler;

impl FeatureScaler for HalvingScaler {
    fn transform(&self, _names: &[String], values: &[f64]) -> Result<Vec<f64>, ScalingError> {
        Ok(values.iter().map(|value| value / 2.0).collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct RejectingScaler;

impl FeatureScaler for RejectingScaler {
    fn transform(&self, names: &[String], _values: &[f64]) -> Result<Vec<f64>, ScalingError> {
        Err(ScalingError::ColumnMismatch {
            fitted: "BMI".to_string(),
            requested: names.join(", "),
        })
    }
}

pub(super) fn default_scaled_features() -> Vec<String> {
    DEFAULT_SCALED_FEATURES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub(super) fn ready_service<C, S>(classifier: C, scaler: S) -> RiskAssessmentService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    let bundle = ArtifactBundle::new(
        classifier,
        scaler,
        FeatureSchema::standard(),
        default_scaled_features(),
    );
    RiskAssessmentService::new(ModelState::Ready(bundle), IncomeBrackets::default())
}

pub(super) fn fixed_service(probability: f64) -> RiskAssessmentService<FixedClassifier, HalvingScaler> {
    ready_service(FixedClassifier(probability), HalvingScaler)
}

pub(super) fn unavailable_service() -> Arc<RiskAssessmentService<FixedClassifier, HalvingScaler>> {
    Arc::new(RiskAssessmentService::new(
        ModelState::Unavailable {
            reason: "failed to read artifact artifacts/model.json".to_string(),
        },
        IncomeBrackets::default(),
    ))
}

/// Age 30, BMI 22.0 and general health 2 with every condition absent.
pub(super) fn healthy_profile() -> UserProfile {
    UserProfile {
        weight_kg: 59.9,
        height_cm: 165.0,
        ..UserProfile::default()
    }
}

/// Hypertension, high cholesterol, BMI 32 and heart disease.
pub(super) fn cardiometabolic_profile() -> UserProfile {
    let mut profile = healthy_profile();
    profile.health.high_blood_pressure = true;
    profile.health.high_cholesterol = true;
    profile.health.heart_disease_or_attack = true;
    profile.weight_kg = 92.5;
    profile.height_cm = 170.0;
    profile
}

pub(super) fn overweight_profile() -> UserProfile {
    let mut profile = healthy_profile();
    profile.weight_kg = 78.0;
    profile.height_cm = 170.0;
    profile
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body can be read");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}
