use serde::{Deserialize, Serialize};

/// Pre-fit numeric normalizer applied to a named subset of the features.
pub trait FeatureScaler: Send + Sync {
    /// Returns the normalized values for `names`, in the same order.
    fn transform(&self, names: &[String], values: &[f64]) -> Result<Vec<f64>, ScalingError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalingError {
    #[error("scaler was fit on [{fitted}] but was asked to transform [{requested}]")]
    ColumnMismatch { fitted: String, requested: String },
    #[error("received {values} values for {names} columns")]
    LengthMismatch { names: usize, values: usize },
}

/// Standardization `(x - mean) / scale`, one entry per fitted column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Returns `None` when the three lists differ in length.
    pub fn new(feature_names: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Option<Self> {
        if feature_names.len() != mean.len() || mean.len() != scale.len() {
            return None;
        }
        Some(Self {
            feature_names,
            mean,
            scale,
        })
    }

    pub fn is_consistent(&self) -> bool {
        self.feature_names.len() == self.mean.len() && self.mean.len() == self.scale.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, names: &[String], values: &[f64]) -> Result<Vec<f64>, ScalingError> {
        if names.len() != values.len() {
            return Err(ScalingError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        if names != self.feature_names.as_slice() {
            return Err(ScalingError::ColumnMismatch {
                fitted: self.feature_names.join(", "),
                requested: names.join(", "),
            });
        }

        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                // zero-variance columns are only centered
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / scale
            })
            .collect())
    }
}
