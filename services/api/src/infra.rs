use glycorisk::assessment::{ArtifactBundle, ModelState, StandardAssessmentService, UserProfile};
use glycorisk::config::ModelConfig;
use glycorisk::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn artifact_dir(config: &ModelConfig, override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| config.artifact_dir.clone())
}

/// Builds the shared service; a failed load leaves it answering 503.
pub(crate) fn assessment_service(config: &ModelConfig, dir: &Path) -> StandardAssessmentService {
    let state = ModelState::from(ArtifactBundle::load(dir));
    StandardAssessmentService::new(state, config.income_brackets.clone())
}

/// Builds the service for a one-shot command, failing on any artifact error.
pub(crate) fn strict_assessment_service(
    config: &ModelConfig,
    dir: &Path,
) -> Result<StandardAssessmentService, AppError> {
    let bundle = ArtifactBundle::load(dir)?;
    Ok(StandardAssessmentService::new(
        ModelState::Ready(bundle),
        config.income_brackets.clone(),
    ))
}

pub(crate) fn read_profile(path: &Path) -> Result<UserProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
