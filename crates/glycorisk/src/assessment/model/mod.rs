//! Adapters for the externally trained classifier and feature scaler.

mod artifacts;
mod classifier;
mod scaler;

pub use artifacts::{
    ArtifactBundle, ArtifactError, ModelState, ScaledFeatureSource, DEFAULT_SCALED_FEATURES,
    FEATURE_NAMES_FILE, MODEL_FILE, SCALED_FEATURES_FILE, SCALER_FILE,
};
pub use classifier::{Classifier, ClassifierError, LogisticModel, LogisticModelArtifact};
pub use scaler::{FeatureScaler, ScalingError, StandardScaler};
