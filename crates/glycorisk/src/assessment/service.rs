use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::advice::{detected_factors, Recommendations};
use super::category::{CategoryDisplay, RiskCategory};
use super::features::{EncodedFeatures, SchemaMismatch};
use super::mapping::IncomeBrackets;
use super::model::{Classifier, ClassifierError, FeatureScaler, ModelState};
use super::profile::{OutOfRange, UserProfile};
use super::scaling::{apply_scaling, ScalingWarning};
use super::scoring::{GuardrailEngine, OverrideBand, ScoreComponent};

/// Result of one assessment, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub raw_probability: f64,
    pub final_probability: f64,
    pub risk_score: u32,
    pub score_components: Vec<ScoreComponent>,
    pub category: RiskCategory,
    pub display: CategoryDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_band: Option<OverrideBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_notice: Option<String>,
    pub detected_factors: Vec<String>,
    pub recommendations: Recommendations,
    pub warnings: Vec<AssessmentWarning>,
    pub assessed_at: DateTime<Utc>,
}

/// Problems that degraded, but did not stop, an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentWarning {
    Scaling(ScalingWarning),
}

impl AssessmentWarning {
    pub fn user_message(&self) -> &'static str {
        match self {
            AssessmentWarning::Scaling(warning) => warning.user_message(),
        }
    }
}

/// Service composing the encoders, trained artifacts and clinical guardrail.
///
/// Artifacts are loaded once and only read afterwards, so a single service
/// can be shared across sessions behind an `Arc`.
pub struct RiskAssessmentService<C, S> {
    model: ModelState<C, S>,
    income_brackets: IncomeBrackets,
    guardrail: GuardrailEngine,
}

impl<C, S> RiskAssessmentService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    pub fn new(model: ModelState<C, S>, income_brackets: IncomeBrackets) -> Self {
        Self::with_guardrail(model, income_brackets, GuardrailEngine::default())
    }

    pub fn with_guardrail(
        model: ModelState<C, S>,
        income_brackets: IncomeBrackets,
        guardrail: GuardrailEngine,
    ) -> Self {
        Self {
            model,
            income_brackets,
            guardrail,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    pub fn model(&self) -> &ModelState<C, S> {
        &self.model
    }

    pub fn income_brackets(&self) -> &IncomeBrackets {
        &self.income_brackets
    }

    /// Runs mapping, assembly, scaling, inference, scoring, override and
    /// categorization for one profile.
    ///
    /// Profiles with answers outside the questionnaire's ranges are refused
    /// before the model is consulted.
    pub fn assess(&self, profile: &UserProfile) -> Result<RiskAssessment, AssessmentError> {
        profile.validate()?;

        let bundle = match &self.model {
            ModelState::Ready(bundle) => bundle,
            ModelState::Unavailable { reason } => {
                return Err(AssessmentError::ModelUnavailable {
                    reason: reason.clone(),
                })
            }
        };

        let encoded = EncodedFeatures::from_profile(profile, &self.income_brackets);
        let mut vector = encoded.assemble(&bundle.schema).map_err(|err| {
            error!(error = %err, "assembled features do not match the model schema");
            AssessmentError::SchemaMismatch(err)
        })?;

        let mut warnings = Vec::new();
        if let Some(warning) = apply_scaling(&mut vector, &bundle.scaler, &bundle.scaled_features) {
            warnings.push(AssessmentWarning::Scaling(warning));
        }

        let raw_probability = bundle
            .classifier
            .predict_probability(&vector)
            .map_err(|err| {
                error!(error = %err, "classifier invocation failed");
                AssessmentError::Classifier(err)
            })?;

        let outcome = self.guardrail.guard(&encoded, raw_probability);
        let final_probability = outcome.adjustment.final_probability;
        let category = RiskCategory::from_probability(final_probability);

        debug!(
            raw_probability,
            final_probability,
            risk_score = outcome.score.total,
            %category,
            "assessment complete"
        );

        Ok(RiskAssessment {
            raw_probability,
            final_probability,
            risk_score: outcome.score.total,
            score_components: outcome.score.components,
            category,
            display: category.display(),
            override_band: outcome.adjustment.tier.map(|tier| tier.band),
            override_notice: outcome.adjustment.notice,
            detected_factors: detected_factors(&encoded),
            recommendations: Recommendations::for_probability(final_probability),
            warnings,
            assessed_at: Utc::now(),
        })
    }
}

/// Fatal assessment failures. No probability is produced for any of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] OutOfRange),
    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: String },
    #[error(transparent)]
    SchemaMismatch(SchemaMismatch),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl AssessmentError {
    /// Plain-language text for end users; technical detail stays in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            AssessmentError::InvalidProfile(_) => {
                "Some answers are outside the accepted range. Please review them and try again."
            }
            AssessmentError::ModelUnavailable { .. } => {
                "The risk model is not available right now, so no estimate can be made."
            }
            AssessmentError::SchemaMismatch(_) => {
                "The risk model does not match this questionnaire. Please contact the service operator."
            }
            AssessmentError::Classifier(_) => {
                "The risk model could not process your answers. Please try again later."
            }
        }
    }
}

impl From<SchemaMismatch> for AssessmentError {
    fn from(value: SchemaMismatch) -> Self {
        Self::SchemaMismatch(value)
    }
}
