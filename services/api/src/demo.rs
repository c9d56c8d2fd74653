use crate::infra::{artifact_dir, read_profile, strict_assessment_service};
use clap::Args;
use glycorisk::assessment::{
    transition, CareAccess, EducationLevel, Lifestyle, QuestionnaireEvent, QuestionnaireState,
    RiskAssessment, Sex,
};
use glycorisk::config::AppConfig;
use glycorisk::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding the questionnaire answers
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Override the directory holding the trained model artifacts
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the directory holding the trained model artifacts
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dir = artifact_dir(&config.model, args.model_dir);
    let service = strict_assessment_service(&config.model, &dir)?;

    let profile = read_profile(&args.profile)?;
    let assessment = service.assess(&profile)?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dir = artifact_dir(&config.model, args.model_dir);
    let service = strict_assessment_service(&config.model, &dir)?;

    println!("Diabetes risk questionnaire demo (artifacts: {})", dir.display());
    for respondent in respondents() {
        println!("\n{}", respondent.name);
        let state = match respondent
            .events
            .into_iter()
            .try_fold(QuestionnaireState::default(), transition)
        {
            Ok(state) => state,
            Err(err) => {
                println!("  Questionnaire rejected: {}", err);
                continue;
            }
        };

        let profile = &state.answers;
        println!(
            "  Age {} | BMI {:.1} ({}) | income {} IDR",
            profile.age,
            profile.bmi(),
            profile.bmi_class().label(),
            profile.annual_income
        );

        match service.assess(profile) {
            Ok(assessment) => render_assessment(&assessment),
            Err(err) => println!("  Assessment unavailable: {}", err.user_message()),
        }
    }

    Ok(())
}

fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "  {} {} risk: {:.1}% (model {:.1}%, risk score {})",
        assessment.display.icon,
        assessment.display.label,
        assessment.final_probability * 100.0,
        assessment.raw_probability * 100.0,
        assessment.risk_score
    );
    if let Some(notice) = &assessment.override_notice {
        println!("  Note: {}", notice);
    }
    if !assessment.score_components.is_empty() {
        println!("  Score components:");
        for component in &assessment.score_components {
            println!("    - +{} {}", component.weight, component.notes);
        }
    }
    if !assessment.detected_factors.is_empty() {
        println!("  Detected factors: {}", assessment.detected_factors.join(", "));
    }
    for warning in &assessment.warnings {
        println!("  Warning: {}", warning.user_message());
    }
    println!("  {}", assessment.recommendations.headline);
    for step in &assessment.recommendations.steps {
        println!("    - {}", step);
    }
}

struct Respondent {
    name: &'static str,
    events: Vec<QuestionnaireEvent>,
}

fn respondents() -> Vec<Respondent> {
    vec![
        Respondent {
            name: "Active adult, no diagnosed conditions",
            events: vec![
                personal(29, Sex::Female, 58.0, 163.0),
                health_history(false, false, false, 2),
                lifestyle(true, false),
                socioeconomic(EducationLevel::DIPLOMA_OR_BACHELOR, 42_000_000),
            ],
        },
        Respondent {
            name: "Overweight, elevated blood pressure",
            events: vec![
                personal(47, Sex::Male, 84.0, 172.0),
                health_history(true, false, false, 3),
                lifestyle(false, true),
                socioeconomic(EducationLevel::HIGH_SCHOOL, 30_000_000),
            ],
        },
        Respondent {
            name: "Several cardiometabolic conditions",
            events: vec![
                personal(63, Sex::Male, 96.0, 168.0),
                health_history(true, true, true, 4),
                lifestyle(false, true),
                socioeconomic(EducationLevel::JUNIOR_HIGH, 18_000_000),
            ],
        },
    ]
}

fn personal(age: u32, sex: Sex, weight_kg: f64, height_cm: f64) -> QuestionnaireEvent {
    QuestionnaireEvent::SubmitPersonal {
        age,
        sex,
        weight_kg,
        height_cm,
    }
}

fn health_history(
    high_blood_pressure: bool,
    high_cholesterol: bool,
    heart_disease_or_attack: bool,
    general_health: u8,
) -> QuestionnaireEvent {
    QuestionnaireEvent::SubmitHealthHistory {
        high_blood_pressure,
        high_cholesterol,
        cholesterol_checked_recently: true,
        stroke: false,
        heart_disease_or_attack,
        difficulty_walking: false,
        general_health,
        mental_health_days: 2,
        physical_health_days: if general_health >= 4 { 10 } else { 1 },
    }
}

fn lifestyle(physically_active: bool, smoker: bool) -> QuestionnaireEvent {
    QuestionnaireEvent::SubmitLifestyle {
        lifestyle: Lifestyle {
            physically_active,
            eats_fruit: physically_active,
            eats_vegetables: true,
            heavy_alcohol_use: false,
        },
        smoker,
    }
}

fn socioeconomic(education: &str, annual_income: u64) -> QuestionnaireEvent {
    QuestionnaireEvent::SubmitSocioeconomic {
        education: EducationLevel::new(education),
        annual_income,
        care: CareAccess::default(),
    }
}
