use serde::{Deserialize, Serialize};
use tracing::warn;

use super::features::FeatureVector;
use super::model::FeatureScaler;

/// Non-fatal scaling failure; the classifier ran on the unscaled columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingWarning {
    pub columns: Vec<String>,
    pub detail: String,
}

impl ScalingWarning {
    pub fn user_message(&self) -> &'static str {
        "Some answers could not be normalized, so this estimate may be less precise than usual."
    }
}

/// Normalizes the declared columns that are present in `vector`, in the
/// order of `scaled_features`.
///
/// The vector is only written when the scaler succeeds; on failure it keeps
/// its previous values and a warning is returned instead.
pub fn apply_scaling<S: FeatureScaler>(
    vector: &mut FeatureVector,
    scaler: &S,
    scaled_features: &[String],
) -> Option<ScalingWarning> {
    let (columns, values): (Vec<String>, Vec<f64>) = scaled_features
        .iter()
        .filter_map(|name| vector.get(name).map(|value| (name.clone(), value)))
        .unzip();

    if columns.is_empty() {
        return None;
    }

    match scaler.transform(&columns, &values) {
        Ok(scaled) => {
            let updates: Vec<(String, f64)> = columns.into_iter().zip(scaled).collect();
            vector.replace(&updates);
            None
        }
        Err(err) => {
            warn!(error = %err, ?columns, "feature scaling failed, continuing unscaled");
            Some(ScalingWarning {
                columns,
                detail: err.to_string(),
            })
        }
    }
}
