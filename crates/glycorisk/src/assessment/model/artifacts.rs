use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::classifier::{Classifier, LogisticModel, LogisticModelArtifact};
use super::scaler::{FeatureScaler, StandardScaler};
use crate::assessment::features::{names, FeatureSchema};

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";
pub const SCALED_FEATURES_FILE: &str = "scaled_features.json";

/// Columns normalized when the bundle carries no scaled-feature list.
pub const DEFAULT_SCALED_FEATURES: [&str; 7] = [
    names::BMI,
    names::MENT_HLTH,
    names::PHYS_HLTH,
    names::AGE,
    names::EDUCATION,
    names::INCOME,
    names::GEN_HLTH,
];

/// Where the scaled-feature list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaledFeatureSource {
    Artifact,
    Fallback,
}

/// Read-only trained artifacts shared by every assessment.
#[derive(Debug, Clone)]
pub struct ArtifactBundle<C, S> {
    pub classifier: C,
    pub scaler: S,
    pub schema: FeatureSchema,
    pub scaled_features: Vec<String>,
    pub scaled_features_source: ScaledFeatureSource,
}

impl<C, S> ArtifactBundle<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    pub fn new(classifier: C, scaler: S, schema: FeatureSchema, scaled_features: Vec<String>) -> Self {
        Self {
            classifier,
            scaler,
            schema,
            scaled_features,
            scaled_features_source: ScaledFeatureSource::Artifact,
        }
    }
}

impl ArtifactBundle<LogisticModel, StandardScaler> {
    /// Loads the bundle from `dir`.
    ///
    /// The model, scaler and feature schema are mandatory; a missing or
    /// unreadable scaled-feature list falls back to [`DEFAULT_SCALED_FEATURES`].
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        let schema: FeatureSchema = read_json(&dir.join(FEATURE_NAMES_FILE))?;
        let artifact: LogisticModelArtifact = read_json(&dir.join(MODEL_FILE))?;
        let classifier = LogisticModel::from_artifact(artifact, &schema)
            .map_err(|missing| ArtifactError::IncompatibleModel { missing })?;

        let scaler: StandardScaler = read_json(&dir.join(SCALER_FILE))?;
        if !scaler.is_consistent() {
            return Err(ArtifactError::InconsistentScaler {
                path: dir.join(SCALER_FILE),
            });
        }

        let (scaled_features, scaled_features_source) =
            match read_json::<Vec<String>>(&dir.join(SCALED_FEATURES_FILE)) {
                Ok(list) => (list, ScaledFeatureSource::Artifact),
                Err(err) => {
                    warn!(error = %err, "scaled feature list unavailable, using defaults");
                    (
                        DEFAULT_SCALED_FEATURES
                            .iter()
                            .map(|name| name.to_string())
                            .collect(),
                        ScaledFeatureSource::Fallback,
                    )
                }
            };

        info!(
            dir = %dir.display(),
            features = schema.len(),
            scaled = scaled_features.len(),
            "loaded model artifacts"
        );

        Ok(Self {
            classifier,
            scaler,
            schema,
            scaled_features,
            scaled_features_source,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Startup failure loading the trained artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("model has no coefficients for features: {}", missing.join(", "))]
    IncompatibleModel { missing: Vec<String> },
    #[error("scaler artifact {} has mismatched column, mean and scale lengths", path.display())]
    InconsistentScaler { path: PathBuf },
}

/// Outcome of artifact loading held for the lifetime of the process.
#[derive(Debug, Clone)]
pub enum ModelState<C, S> {
    Ready(ArtifactBundle<C, S>),
    Unavailable { reason: String },
}

impl<C, S> ModelState<C, S> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }
}

impl<C, S> From<Result<ArtifactBundle<C, S>, ArtifactError>> for ModelState<C, S> {
    fn from(value: Result<ArtifactBundle<C, S>, ArtifactError>) -> Self {
        match value {
            Ok(bundle) => ModelState::Ready(bundle),
            Err(err) => {
                tracing::error!(error = %err, "model artifacts unavailable");
                ModelState::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }
}
