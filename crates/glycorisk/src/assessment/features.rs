use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::mapping::{map_age_to_code, map_education, map_income_to_code, IncomeBrackets};
use super::profile::UserProfile;

/// Column names of the survey-derived feature space.
pub mod names {
    pub const HIGH_BP: &str = "HighBP";
    pub const HIGH_CHOL: &str = "HighChol";
    pub const CHOL_CHECK: &str = "CholCheck";
    pub const BMI: &str = "BMI";
    pub const SMOKER: &str = "Smoker";
    pub const STROKE: &str = "Stroke";
    pub const HEART_DISEASE_OR_ATTACK: &str = "HeartDiseaseorAttack";
    pub const PHYS_ACTIVITY: &str = "PhysActivity";
    pub const FRUITS: &str = "Fruits";
    pub const VEGGIES: &str = "Veggies";
    pub const HVY_ALCOHOL_CONSUMP: &str = "HvyAlcoholConsump";
    pub const ANY_HEALTHCARE: &str = "AnyHealthcare";
    pub const NO_DOCBC_COST: &str = "NoDocbcCost";
    pub const GEN_HLTH: &str = "GenHlth";
    pub const MENT_HLTH: &str = "MentHlth";
    pub const PHYS_HLTH: &str = "PhysHlth";
    pub const DIFF_WALK: &str = "DiffWalk";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const EDUCATION: &str = "Education";
    pub const INCOME: &str = "Income";
}

/// Answers after encoding: flags as 0/1, ordinal fields as codes, BMI continuous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatures {
    pub high_bp: u8,
    pub high_chol: u8,
    pub chol_check: u8,
    pub bmi: f64,
    pub smoker: u8,
    pub stroke: u8,
    pub heart_disease_or_attack: u8,
    pub phys_activity: u8,
    pub fruits: u8,
    pub veggies: u8,
    pub hvy_alcohol_consump: u8,
    pub any_healthcare: u8,
    pub no_docbc_cost: u8,
    pub gen_hlth: u8,
    pub ment_hlth: u8,
    pub phys_hlth: u8,
    pub diff_walk: u8,
    pub sex: u8,
    pub age: u8,
    pub education: u8,
    pub income: u8,
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl EncodedFeatures {
    pub fn from_profile(profile: &UserProfile, brackets: &IncomeBrackets) -> Self {
        let health = &profile.health;
        let lifestyle = &profile.lifestyle;

        Self {
            high_bp: flag(health.high_blood_pressure),
            high_chol: flag(health.high_cholesterol),
            chol_check: flag(health.cholesterol_checked_recently),
            bmi: profile.bmi(),
            smoker: flag(health.smoker),
            stroke: flag(health.stroke),
            heart_disease_or_attack: flag(health.heart_disease_or_attack),
            phys_activity: flag(lifestyle.physically_active),
            fruits: flag(lifestyle.eats_fruit),
            veggies: flag(lifestyle.eats_vegetables),
            hvy_alcohol_consump: flag(lifestyle.heavy_alcohol_use),
            any_healthcare: flag(profile.care.any_healthcare),
            no_docbc_cost: flag(profile.care.no_doctor_because_of_cost),
            gen_hlth: profile.general_health,
            ment_hlth: profile.mental_health_days,
            phys_hlth: profile.physical_health_days,
            diff_walk: flag(health.difficulty_walking),
            sex: profile.sex.code(),
            age: map_age_to_code(profile.age),
            education: map_education(&profile.education),
            income: map_income_to_code(profile.annual_income, brackets),
        }
    }

    /// Every assembled column in canonical order.
    pub fn columns(&self) -> [(&'static str, f64); 21] {
        [
            (names::HIGH_BP, f64::from(self.high_bp)),
            (names::HIGH_CHOL, f64::from(self.high_chol)),
            (names::CHOL_CHECK, f64::from(self.chol_check)),
            (names::BMI, self.bmi),
            (names::SMOKER, f64::from(self.smoker)),
            (names::STROKE, f64::from(self.stroke)),
            (names::HEART_DISEASE_OR_ATTACK, f64::from(self.heart_disease_or_attack)),
            (names::PHYS_ACTIVITY, f64::from(self.phys_activity)),
            (names::FRUITS, f64::from(self.fruits)),
            (names::VEGGIES, f64::from(self.veggies)),
            (names::HVY_ALCOHOL_CONSUMP, f64::from(self.hvy_alcohol_consump)),
            (names::ANY_HEALTHCARE, f64::from(self.any_healthcare)),
            (names::NO_DOCBC_COST, f64::from(self.no_docbc_cost)),
            (names::GEN_HLTH, f64::from(self.gen_hlth)),
            (names::MENT_HLTH, f64::from(self.ment_hlth)),
            (names::PHYS_HLTH, f64::from(self.phys_hlth)),
            (names::DIFF_WALK, f64::from(self.diff_walk)),
            (names::SEX, f64::from(self.sex)),
            (names::AGE, f64::from(self.age)),
            (names::EDUCATION, f64::from(self.education)),
            (names::INCOME, f64::from(self.income)),
        ]
    }

    /// Projects the record onto the classifier's schema, in schema order.
    ///
    /// Columns the schema does not declare are left out; a declared column
    /// this record cannot supply fails the whole assembly.
    pub fn assemble(&self, schema: &FeatureSchema) -> Result<FeatureVector, SchemaMismatch> {
        let columns = self.columns();
        let mut entries = Vec::with_capacity(schema.len());
        let mut missing = Vec::new();

        for name in schema.names() {
            match columns.iter().find(|(column, _)| *column == name.as_str()) {
                Some((_, value)) => entries.push((name.clone(), *value)),
                None => missing.push(name.clone()),
            }
        }

        if missing.is_empty() {
            Ok(FeatureVector { entries })
        } else {
            Err(SchemaMismatch { missing })
        }
    }
}

/// Ordered feature-name list the classifier was trained with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, InvalidSchema> {
        if names.is_empty() {
            return Err(InvalidSchema::Empty);
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(InvalidSchema::Duplicate(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// The full survey column set, in canonical order.
    pub fn standard() -> Self {
        let names = EncodedFeatures::from_profile(&UserProfile::default(), &IncomeBrackets::default())
            .columns()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = InvalidSchema;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(value: FeatureSchema) -> Self {
        value.names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSchema {
    #[error("feature schema is empty")]
    Empty,
    #[error("feature '{0}' is declared more than once")]
    Duplicate(String),
}

/// Schema column with no counterpart in the assembled record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("classifier expects features the questionnaire does not provide: {}", missing.join(", "))]
pub struct SchemaMismatch {
    pub missing: Vec<String>,
}

/// Named numeric inputs in exactly the classifier's schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(known, _)| known == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites existing columns; names not in the vector are ignored.
    pub(crate) fn replace(&mut self, updates: &[(String, f64)]) {
        for (name, value) in updates {
            if let Some(entry) = self.entries.iter_mut().find(|(known, _)| known == name) {
                entry.1 = *value;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }
}
