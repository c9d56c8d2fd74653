//! Diabetes risk assessment: answers in, guarded probability and band out.
//!
//! Data flows from [`profile::UserProfile`] through the field mappers into an
//! [`features::EncodedFeatures`] record, which is projected onto the model
//! schema, scaled, and scored by the classifier. The same encoded record
//! feeds the rule-based guardrail, whose floor is combined with the raw
//! probability before categorization.

pub mod advice;
pub mod category;
pub mod features;
pub mod mapping;
pub mod model;
pub mod profile;
pub mod questionnaire;
pub mod router;
pub mod scaling;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use advice::{AdviceKind, Recommendations};
pub use category::{CategoryDisplay, RiskCategory};
pub use features::{EncodedFeatures, FeatureSchema, FeatureVector, SchemaMismatch};
pub use mapping::{map_age_to_code, map_education, map_income_to_code, IncomeBrackets};
pub use model::{
    ArtifactBundle, ArtifactError, Classifier, ClassifierError, FeatureScaler, LogisticModel,
    ModelState, ScalingError, StandardScaler,
};
pub use profile::{
    BmiClass, CareAccess, EducationLevel, HealthHistory, Lifestyle, OutOfRange, Sex, UserProfile,
};
pub use questionnaire::{transition, QuestionnaireEvent, QuestionnaireState, Step, TransitionError};
pub use router::{assessment_router, TransitionRequest};
pub use scaling::ScalingWarning;
pub use scoring::{
    GuardrailEngine, OverrideBand, OverridePolicy, RiskFactor, RiskRuleSet, RiskScore,
    ScoreComponent,
};
pub use service::{AssessmentError, AssessmentWarning, RiskAssessment, RiskAssessmentService};

/// Service type backed by the JSON artifact bundle.
pub type StandardAssessmentService = RiskAssessmentService<LogisticModel, StandardScaler>;
