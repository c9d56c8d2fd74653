use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::model::{Classifier, FeatureScaler};
use super::profile::UserProfile;
use super::questionnaire::{transition, QuestionnaireEvent, QuestionnaireState};
use super::service::{RiskAssessment, RiskAssessmentService};
use crate::error::AppError;

/// Router builder exposing the assessment and questionnaire endpoints.
pub fn assessment_router<C, S>(service: Arc<RiskAssessmentService<C, S>>) -> Router
where
    C: Classifier + 'static,
    S: FeatureScaler + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<C, S>))
        .route("/api/v1/questionnaire/initial", get(initial_state_handler))
        .route("/api/v1/questionnaire/transition", post(transition_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler<C, S>(
    State(service): State<Arc<RiskAssessmentService<C, S>>>,
    payload: Result<axum::Json<UserProfile>, JsonRejection>,
) -> Result<axum::Json<RiskAssessment>, AppError>
where
    C: Classifier + 'static,
    S: FeatureScaler + 'static,
{
    let axum::Json(profile) = payload?;
    let assessment = service.assess(&profile)?;
    Ok(axum::Json(assessment))
}

pub(crate) async fn initial_state_handler() -> axum::Json<QuestionnaireState> {
    axum::Json(QuestionnaireState::default())
}

/// Body of a questionnaire step request; the client keeps the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub state: QuestionnaireState,
    pub event: QuestionnaireEvent,
}

pub(crate) async fn transition_handler(
    payload: Result<axum::Json<TransitionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let axum::Json(request) = payload?;
    let response = match transition(request.state, request.event) {
        Ok(state) => (StatusCode::OK, axum::Json(state)).into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    };
    Ok(response)
}
