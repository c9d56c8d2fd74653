//! Four-step questionnaire as an explicit state value.
//!
//! The caller owns the state between requests; [`transition`] is pure and
//! returns the next state or the reason the event was refused.

use serde::{Deserialize, Serialize};

use super::profile::{
    check_age, check_body, check_health_ratings, check_income, CareAccess, EducationLevel,
    Lifestyle, OutOfRange, Sex, UserProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Personal,
    HealthHistory,
    Lifestyle,
    Socioeconomic,
}

impl Step {
    pub const COUNT: u8 = 4;

    pub fn number(self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::HealthHistory => 2,
            Step::Lifestyle => 3,
            Step::Socioeconomic => 4,
        }
    }

    fn next(self) -> Self {
        match self {
            Step::Personal => Step::HealthHistory,
            Step::HealthHistory => Step::Lifestyle,
            Step::Lifestyle | Step::Socioeconomic => Step::Socioeconomic,
        }
    }

    fn previous(self) -> Self {
        match self {
            Step::Personal | Step::HealthHistory => Step::Personal,
            Step::Lifestyle => Step::HealthHistory,
            Step::Socioeconomic => Step::Lifestyle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireState {
    pub step: Step,
    pub answers: UserProfile,
    pub showing_result: bool,
}

impl Default for QuestionnaireState {
    fn default() -> Self {
        Self {
            step: Step::Personal,
            answers: UserProfile::default(),
            showing_result: false,
        }
    }
}

impl QuestionnaireState {
    pub fn progress(&self) -> f64 {
        f64::from(self.step.number()) / f64::from(Step::COUNT)
    }

    /// All four steps were submitted and the result view is active.
    pub fn ready_for_assessment(&self) -> bool {
        self.showing_result
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionnaireEvent {
    SubmitPersonal {
        age: u32,
        sex: Sex,
        weight_kg: f64,
        height_cm: f64,
    },
    SubmitHealthHistory {
        high_blood_pressure: bool,
        high_cholesterol: bool,
        cholesterol_checked_recently: bool,
        stroke: bool,
        heart_disease_or_attack: bool,
        difficulty_walking: bool,
        general_health: u8,
        mental_health_days: u8,
        physical_health_days: u8,
    },
    SubmitLifestyle {
        lifestyle: Lifestyle,
        smoker: bool,
    },
    SubmitSocioeconomic {
        education: EducationLevel,
        annual_income: u64,
        care: CareAccess,
    },
    Back,
    EditAnswers,
    Reset,
}

impl QuestionnaireEvent {
    fn step(&self) -> Option<Step> {
        match self {
            QuestionnaireEvent::SubmitPersonal { .. } => Some(Step::Personal),
            QuestionnaireEvent::SubmitHealthHistory { .. } => Some(Step::HealthHistory),
            QuestionnaireEvent::SubmitLifestyle { .. } => Some(Step::Lifestyle),
            QuestionnaireEvent::SubmitSocioeconomic { .. } => Some(Step::Socioeconomic),
            QuestionnaireEvent::Back
            | QuestionnaireEvent::EditAnswers
            | QuestionnaireEvent::Reset => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("answers for step {} were submitted while on step {}", received.number(), current.number())]
    OutOfOrder { current: Step, received: Step },
    #[error("answers are locked while the result is shown; edit them first")]
    ResultShown,
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}

pub fn transition(
    state: QuestionnaireState,
    event: QuestionnaireEvent,
) -> Result<QuestionnaireState, TransitionError> {
    if let Some(received) = event.step() {
        if state.showing_result {
            return Err(TransitionError::ResultShown);
        }
        if received != state.step {
            return Err(TransitionError::OutOfOrder {
                current: state.step,
                received,
            });
        }
    }

    let mut next = state;
    match event {
        QuestionnaireEvent::SubmitPersonal {
            age,
            sex,
            weight_kg,
            height_cm,
        } => {
            check_age(age)?;
            check_body(weight_kg, height_cm)?;

            next.answers.age = age;
            next.answers.sex = sex;
            next.answers.weight_kg = weight_kg;
            next.answers.height_cm = height_cm;
            next.step = next.step.next();
        }
        QuestionnaireEvent::SubmitHealthHistory {
            high_blood_pressure,
            high_cholesterol,
            cholesterol_checked_recently,
            stroke,
            heart_disease_or_attack,
            difficulty_walking,
            general_health,
            mental_health_days,
            physical_health_days,
        } => {
            check_health_ratings(general_health, mental_health_days, physical_health_days)?;

            let health = &mut next.answers.health;
            health.high_blood_pressure = high_blood_pressure;
            health.high_cholesterol = high_cholesterol;
            health.cholesterol_checked_recently = cholesterol_checked_recently;
            health.stroke = stroke;
            health.heart_disease_or_attack = heart_disease_or_attack;
            health.difficulty_walking = difficulty_walking;
            next.answers.general_health = general_health;
            next.answers.mental_health_days = mental_health_days;
            next.answers.physical_health_days = physical_health_days;
            next.step = next.step.next();
        }
        QuestionnaireEvent::SubmitLifestyle { lifestyle, smoker } => {
            next.answers.lifestyle = lifestyle;
            next.answers.health.smoker = smoker;
            next.step = next.step.next();
        }
        QuestionnaireEvent::SubmitSocioeconomic {
            education,
            annual_income,
            care,
        } => {
            check_income(annual_income)?;
            next.answers.education = education;
            next.answers.annual_income = annual_income;
            next.answers.care = care;
            next.showing_result = true;
        }
        QuestionnaireEvent::Back => {
            if next.showing_result {
                next.showing_result = false;
            } else {
                next.step = next.step.previous();
            }
        }
        QuestionnaireEvent::EditAnswers => {
            next.showing_result = false;
        }
        QuestionnaireEvent::Reset => {
            next = QuestionnaireState::default();
        }
    }

    Ok(next)
}
