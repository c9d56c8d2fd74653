use serde::{Deserialize, Serialize};

/// Biological sex as captured by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

/// Highest completed education, kept as the label the user picked.
///
/// Labels outside the known table are preserved verbatim so they can be
/// encoded with the mid-range fallback instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EducationLevel(pub String);

impl EducationLevel {
    pub const ELEMENTARY: &'static str = "SD";
    pub const JUNIOR_HIGH: &'static str = "SMP";
    pub const HIGH_SCHOOL: &'static str = "SMA";
    pub const DIPLOMA_OR_BACHELOR: &'static str = "D3/S1";
    pub const POSTGRADUATE: &'static str = "S2/S3";

    /// Options offered by the socioeconomic step, in display order.
    pub const OPTIONS: [&'static str; 5] = [
        Self::ELEMENTARY,
        Self::JUNIOR_HIGH,
        Self::HIGH_SCHOOL,
        Self::DIPLOMA_OR_BACHELOR,
        Self::POSTGRADUATE,
    ];

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EducationLevel {
    fn default() -> Self {
        Self::new(Self::HIGH_SCHOOL)
    }
}

/// Display classification of the body mass index shown after step one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    Normal,
    NeedsAttention,
    Obese,
}

impl BmiClass {
    pub fn from_bmi(bmi: f64) -> Self {
        if (18.5..25.0).contains(&bmi) {
            Self::Normal
        } else if bmi >= 30.0 {
            Self::Obese
        } else {
            Self::NeedsAttention
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiClass::Normal => "Normal",
            BmiClass::NeedsAttention => "Needs attention",
            BmiClass::Obese => "Obese",
        }
    }
}

/// Diagnosed conditions and screening history collected in step two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthHistory {
    pub high_blood_pressure: bool,
    pub high_cholesterol: bool,
    pub cholesterol_checked_recently: bool,
    pub smoker: bool,
    pub stroke: bool,
    pub heart_disease_or_attack: bool,
    pub difficulty_walking: bool,
}

/// Daily habits collected in step three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifestyle {
    pub physically_active: bool,
    pub eats_fruit: bool,
    pub eats_vegetables: bool,
    pub heavy_alcohol_use: bool,
}

/// Access to care reported in step four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareAccess {
    pub any_healthcare: bool,
    pub no_doctor_because_of_cost: bool,
}

impl Default for CareAccess {
    fn default() -> Self {
        Self {
            any_healthcare: true,
            no_doctor_because_of_cost: false,
        }
    }
}

/// Raw questionnaire answers for a single session.
///
/// BMI is never stored; [`UserProfile::bmi`] derives it from weight and
/// height every time it is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub health: HealthHistory,
    pub lifestyle: Lifestyle,
    pub mental_health_days: u8,
    pub physical_health_days: u8,
    pub general_health: u8,
    pub education: EducationLevel,
    pub annual_income: u64,
    pub care: CareAccess,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 30,
            sex: Sex::Female,
            weight_kg: 60.0,
            height_cm: 165.0,
            health: HealthHistory::default(),
            lifestyle: Lifestyle::default(),
            mental_health_days: 0,
            physical_health_days: 0,
            general_health: 2,
            education: EducationLevel::default(),
            annual_income: 30_000_000,
            care: CareAccess::default(),
        }
    }
}

pub const AGE_RANGE: (u32, u32) = (18, 100);
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 200.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);
pub const GENERAL_HEALTH_RANGE: (u8, u8) = (1, 5);
pub const HEALTH_DAYS_MAX: u8 = 30;
pub const INCOME_MAX: u64 = 1_000_000_000;

/// An answer outside the range the questionnaire accepts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be between {min} and {max}, got {value}")]
pub struct OutOfRange {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Non-finite values are always out of range.
fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), OutOfRange> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn check_age(age: u32) -> Result<(), OutOfRange> {
    check_range("age", f64::from(age), f64::from(AGE_RANGE.0), f64::from(AGE_RANGE.1))
}

pub(crate) fn check_body(weight_kg: f64, height_cm: f64) -> Result<(), OutOfRange> {
    check_range("weight_kg", weight_kg, WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1)?;
    check_range("height_cm", height_cm, HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)
}

pub(crate) fn check_health_ratings(
    general_health: u8,
    mental_health_days: u8,
    physical_health_days: u8,
) -> Result<(), OutOfRange> {
    check_range(
        "general_health",
        f64::from(general_health),
        f64::from(GENERAL_HEALTH_RANGE.0),
        f64::from(GENERAL_HEALTH_RANGE.1),
    )?;
    let days_max = f64::from(HEALTH_DAYS_MAX);
    check_range("mental_health_days", f64::from(mental_health_days), 0.0, days_max)?;
    check_range("physical_health_days", f64::from(physical_health_days), 0.0, days_max)
}

pub(crate) fn check_income(annual_income: u64) -> Result<(), OutOfRange> {
    if annual_income > INCOME_MAX {
        return Err(OutOfRange {
            field: "annual_income",
            value: annual_income as f64,
            min: 0.0,
            max: INCOME_MAX as f64,
        });
    }
    Ok(())
}

impl UserProfile {
    /// Checks every bounded answer; the first offending field is reported.
    pub fn validate(&self) -> Result<(), OutOfRange> {
        check_age(self.age)?;
        check_body(self.weight_kg, self.height_cm)?;
        check_health_ratings(
            self.general_health,
            self.mental_health_days,
            self.physical_health_days,
        )?;
        check_income(self.annual_income)
    }

    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }

    pub fn bmi_class(&self) -> BmiClass {
        BmiClass::from_bmi(self.bmi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_follows_weight_and_height() {
        let mut profile = UserProfile::default();
        assert!((profile.bmi() - 22.038567).abs() < 1e-5);

        profile.weight_kg = 90.0;
        profile.height_cm = 170.0;
        assert!((profile.bmi() - 31.141869).abs() < 1e-5);
        assert_eq!(profile.bmi_class(), BmiClass::Obese);
    }

    #[test]
    fn bmi_class_boundaries() {
        assert_eq!(BmiClass::from_bmi(18.4), BmiClass::NeedsAttention);
        assert_eq!(BmiClass::from_bmi(18.5), BmiClass::Normal);
        assert_eq!(BmiClass::from_bmi(25.0), BmiClass::NeedsAttention);
        assert_eq!(BmiClass::from_bmi(30.0), BmiClass::Obese);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let profile: UserProfile =
            serde_json::from_str(r#"{ "age": 64, "health": { "stroke": true } }"#)
                .expect("profile parses");
        assert_eq!(profile.age, 64);
        assert!(profile.health.stroke);
        assert!(!profile.health.high_blood_pressure);
        assert!(profile.care.any_healthcare);
        assert_eq!(profile.education.as_str(), "SMA");
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(UserProfile::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unusable_body_measurements() {
        let profile = UserProfile {
            height_cm: 0.0,
            ..UserProfile::default()
        };
        match profile.validate() {
            Err(OutOfRange { field, min, .. }) => {
                assert_eq!(field, "height_cm");
                assert_eq!(min, 100.0);
            }
            other => panic!("expected height out of range, got {other:?}"),
        }

        let profile = UserProfile {
            weight_kg: f64::NAN,
            ..UserProfile::default()
        };
        assert_eq!(profile.validate().map_err(|err| err.field), Err("weight_kg"));
    }

    #[test]
    fn validate_rejects_out_of_scale_ratings() {
        for (general_health, mental, physical, field) in [
            (0, 0, 0, "general_health"),
            (6, 0, 0, "general_health"),
            (2, 31, 0, "mental_health_days"),
            (2, 0, 31, "physical_health_days"),
        ] {
            let profile = UserProfile {
                general_health,
                mental_health_days: mental,
                physical_health_days: physical,
                ..UserProfile::default()
            };
            assert_eq!(profile.validate().map_err(|err| err.field), Err(field));
        }
    }

    #[test]
    fn validate_bounds_are_inclusive() {
        let profile = UserProfile {
            age: 100,
            weight_kg: 200.0,
            height_cm: 100.0,
            general_health: 5,
            mental_health_days: 30,
            physical_health_days: 30,
            annual_income: INCOME_MAX,
            ..UserProfile::default()
        };
        assert_eq!(profile.validate(), Ok(()));

        let profile = UserProfile {
            annual_income: INCOME_MAX + 1,
            ..UserProfile::default()
        };
        assert_eq!(profile.validate().map_err(|err| err.field), Err("annual_income"));
    }
}
