use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::features::{FeatureSchema, FeatureVector};

/// Pre-trained binary classifier returning the positive-class probability.
pub trait Classifier: Send + Sync {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;
}

/// Failures while invoking the classifier for a single assessment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier expects features [{expected}] but received [{actual}]")]
    FeatureMismatch { expected: String, actual: String },
    #[error("classifier produced an invalid probability: {0}")]
    InvalidProbability(f64),
}

/// Logistic regression over the schema's columns.
///
/// Coefficients are stored in schema order so that inference is a single
/// zip over the incoming vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// On-disk form of [`LogisticModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModelArtifact {
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl LogisticModel {
    /// Orders the coefficients by `schema`; returns the features lacking a
    /// coefficient on failure.
    pub fn from_artifact(
        artifact: LogisticModelArtifact,
        schema: &FeatureSchema,
    ) -> Result<Self, Vec<String>> {
        let mut coefficients = Vec::with_capacity(schema.len());
        let mut missing = Vec::new();

        for name in schema.names() {
            match artifact.coefficients.get(name) {
                Some(weight) => coefficients.push(*weight),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            feature_names: schema.names().to_vec(),
            coefficients,
            intercept: artifact.intercept,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

fn sigmoid(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

impl Classifier for LogisticModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        if !features.names().eq(self.feature_names.iter().map(String::as_str)) {
            return Err(ClassifierError::FeatureMismatch {
                expected: self.feature_names.join(", "),
                actual: features.names().collect::<Vec<_>>().join(", "),
            });
        }

        let logit = self
            .coefficients
            .iter()
            .zip(features.values())
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value);

        let probability = sigmoid(logit);
        if probability.is_finite() && (0.0..=1.0).contains(&probability) {
            Ok(probability)
        } else {
            Err(ClassifierError::InvalidProbability(probability))
        }
    }
}
