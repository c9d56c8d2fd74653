use serde::{Deserialize, Serialize};

use crate::assessment::features::EncodedFeatures;

/// Clinical condition contributing to the heuristic risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Hypertension,
    HighCholesterol,
    Obesity,
    Overweight,
    HeartDisease,
    Stroke,
    PoorGeneralHealth,
    DifficultyWalking,
    AgeSixtyPlus,
}

/// Rules in the same group are alternatives: only the first match counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusiveGroup {
    BodyMass,
}

/// One weighted predicate of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub factor: RiskFactor,
    pub weight: u8,
    pub group: Option<ExclusiveGroup>,
    applies: fn(&EncodedFeatures) -> bool,
    describe: fn(&EncodedFeatures) -> String,
}

impl RiskRule {
    pub fn new(
        factor: RiskFactor,
        weight: u8,
        applies: fn(&EncodedFeatures) -> bool,
        describe: fn(&EncodedFeatures) -> String,
    ) -> Self {
        Self {
            factor,
            weight,
            group: None,
            applies,
            describe,
        }
    }

    pub fn in_group(mut self, group: ExclusiveGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn applies(&self, features: &EncodedFeatures) -> bool {
        (self.applies)(features)
    }
}

/// Discrete contribution to a risk score, kept for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactor,
    pub weight: u8,
    pub notes: String,
}

/// Heuristic score with the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub total: u32,
    pub components: Vec<ScoreComponent>,
}

impl RiskScore {
    pub fn contains(&self, factor: RiskFactor) -> bool {
        self.components
            .iter()
            .any(|component| component.factor == factor)
    }
}

/// Ordered, additive rule table evaluated independently of the classifier.
#[derive(Debug, Clone)]
pub struct RiskRuleSet {
    rules: Vec<RiskRule>,
}

impl RiskRuleSet {
    pub fn new(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            RiskRule::new(
                RiskFactor::Hypertension,
                2,
                |f| f.high_bp == 1,
                |_| "high blood pressure".to_string(),
            ),
            RiskRule::new(
                RiskFactor::HighCholesterol,
                2,
                |f| f.high_chol == 1,
                |_| "high cholesterol".to_string(),
            ),
            RiskRule::new(
                RiskFactor::Obesity,
                3,
                |f| f.bmi >= 30.0,
                |f| format!("BMI {:.1} in the obese range", f.bmi),
            )
            .in_group(ExclusiveGroup::BodyMass),
            RiskRule::new(
                RiskFactor::Overweight,
                1,
                |f| f.bmi >= 25.0 && f.bmi < 30.0,
                |f| format!("BMI {:.1} in the overweight range", f.bmi),
            )
            .in_group(ExclusiveGroup::BodyMass),
            RiskRule::new(
                RiskFactor::HeartDisease,
                3,
                |f| f.heart_disease_or_attack == 1,
                |_| "history of heart disease or heart attack".to_string(),
            ),
            RiskRule::new(
                RiskFactor::Stroke,
                3,
                |f| f.stroke == 1,
                |_| "history of stroke".to_string(),
            ),
            RiskRule::new(
                RiskFactor::PoorGeneralHealth,
                2,
                |f| f.gen_hlth >= 4,
                |f| format!("self-rated general health {} of 5", f.gen_hlth),
            ),
            RiskRule::new(
                RiskFactor::DifficultyWalking,
                1,
                |f| f.diff_walk == 1,
                |_| "difficulty walking or climbing stairs".to_string(),
            ),
            RiskRule::new(
                RiskFactor::AgeSixtyPlus,
                1,
                |f| f.age >= 9,
                |f| format!("age group {} (60 years or older)", f.age),
            ),
        ])
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn evaluate(&self, features: &EncodedFeatures) -> RiskScore {
        let mut components = Vec::new();
        let mut claimed_groups: Vec<ExclusiveGroup> = Vec::new();
        let mut total: u32 = 0;

        for rule in &self.rules {
            if let Some(group) = rule.group {
                if claimed_groups.contains(&group) {
                    continue;
                }
            }
            if !rule.applies(features) {
                continue;
            }
            if let Some(group) = rule.group {
                claimed_groups.push(group);
            }

            total += u32::from(rule.weight);
            components.push(ScoreComponent {
                factor: rule.factor,
                weight: rule.weight,
                notes: (rule.describe)(features),
            });
        }

        RiskScore { total, components }
    }

    /// Highest attainable total: every ungrouped rule plus the heaviest rule
    /// of each exclusive group.
    pub fn max_score(&self) -> u32 {
        let mut group_max: Vec<(ExclusiveGroup, u8)> = Vec::new();
        let mut total: u32 = 0;

        for rule in &self.rules {
            match rule.group {
                None => total += u32::from(rule.weight),
                Some(group) => match group_max.iter_mut().find(|(known, _)| *known == group) {
                    Some((_, weight)) => *weight = (*weight).max(rule.weight),
                    None => group_max.push((group, rule.weight)),
                },
            }
        }

        total + group_max.iter().map(|(_, weight)| u32::from(*weight)).sum::<u32>()
    }
}

impl Default for RiskRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
