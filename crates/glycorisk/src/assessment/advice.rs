use serde::{Deserialize, Serialize};

use super::features::EncodedFeatures;

/// Final probabilities above this call for medical follow-up.
pub const ATTENTION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    MedicalAttention,
    Maintain,
}

/// Health guidance shown next to the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub kind: AdviceKind,
    pub headline: String,
    pub steps: Vec<String>,
}

impl Recommendations {
    pub fn for_probability(final_probability: f64) -> Self {
        if final_probability > ATTENTION_THRESHOLD {
            Self {
                kind: AdviceKind::MedicalAttention,
                headline: "Medical attention recommended".to_string(),
                steps: vec![
                    "Get a fasting blood glucose and HbA1c test soon.".to_string(),
                    "See a doctor about managing blood pressure or cholesterol, if present."
                        .to_string(),
                    "Aim to lose 5-10% of body weight if your BMI is above 25.".to_string(),
                ],
            }
        } else {
            Self {
                kind: AdviceKind::Maintain,
                headline: "Keep up your current habits".to_string(),
                steps: vec![
                    "Keep exercising regularly, about 150 minutes per week.".to_string(),
                    "Keep a balanced diet with fewer fried and sugary foods.".to_string(),
                    "Have a health check-up at least once a year.".to_string(),
                ],
            }
        }
    }
}

/// Major risk factors called out to the user, independent of the score table.
pub fn detected_factors(features: &EncodedFeatures) -> Vec<String> {
    let mut detected = Vec::new();
    if features.high_bp == 1 {
        detected.push("High blood pressure".to_string());
    }
    if features.high_chol == 1 {
        detected.push("High cholesterol".to_string());
    }
    if features.bmi >= 30.0 {
        detected.push(format!("Obesity (BMI {:.1})", features.bmi));
    }
    if features.smoker == 1 {
        detected.push("Smoker".to_string());
    }
    if features.heart_disease_or_attack == 1 {
        detected.push("Heart disease history".to_string());
    }
    detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::mapping::IncomeBrackets;
    use crate::assessment::profile::UserProfile;

    #[test]
    fn threshold_is_strictly_above_half() {
        assert_eq!(Recommendations::for_probability(0.5).kind, AdviceKind::Maintain);
        assert_eq!(
            Recommendations::for_probability(0.5001).kind,
            AdviceKind::MedicalAttention
        );
    }

    #[test]
    fn lists_major_factors_only() {
        let mut profile = UserProfile::default();
        profile.health.smoker = true;
        profile.health.stroke = true;
        profile.weight_kg = 95.0;
        profile.height_cm = 170.0;
        let features = EncodedFeatures::from_profile(&profile, &IncomeBrackets::default());

        assert_eq!(
            detected_factors(&features),
            vec!["Obesity (BMI 32.9)".to_string(), "Smoker".to_string()]
        );
    }
}
