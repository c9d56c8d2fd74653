//! Translation from questionnaire answers into the classifier's categorical codes.
//!
//! Every function here is total: any input in the domain maps to exactly one code.

use serde::{Deserialize, Serialize};

use super::profile::EducationLevel;

/// Exclusive upper bounds of the 5-year age groups, codes 1..=12.
const AGE_GROUP_BOUNDS: [u64; 12] = [25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80];

/// Education code used for labels missing from [`EDUCATION_CODES`].
pub const DEFAULT_EDUCATION_CODE: u8 = 4;

const EDUCATION_CODES: [(&str, u8); 7] = [
    (EducationLevel::ELEMENTARY, 2),
    (EducationLevel::JUNIOR_HIGH, 3),
    (EducationLevel::HIGH_SCHOOL, 4),
    (EducationLevel::DIPLOMA_OR_BACHELOR, 5),
    (EducationLevel::POSTGRADUATE, 6),
    ("Tidak Sekolah/SD", 2),
    ("Sarjana+", 6),
];

/// Age in years to the 13-level age group code (1 = under 25, 13 = 80 and over).
pub fn map_age_to_code(age: u32) -> u8 {
    code_for_bounds(&AGE_GROUP_BOUNDS, u64::from(age))
}

/// Education label to its survey code; unknown labels fall back to
/// [`DEFAULT_EDUCATION_CODE`].
pub fn map_education(label: &EducationLevel) -> u8 {
    EDUCATION_CODES
        .iter()
        .find(|(known, _)| *known == label.as_str())
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_EDUCATION_CODE)
}

/// Annual income to the 8-level income code using the deployment's brackets.
pub fn map_income_to_code(amount: u64, brackets: &IncomeBrackets) -> u8 {
    brackets.code_for(amount)
}

/// Position of `value` among ascending exclusive upper bounds, 1-based.
fn code_for_bounds(bounds: &[u64], value: u64) -> u8 {
    let below = bounds.iter().take_while(|bound| value >= **bound).count();
    (below + 1) as u8
}

const INCOME_BOUNDARY_COUNT: usize = 7;

/// Currency-specific income boundaries.
///
/// Holds the exclusive upper bounds for codes 1 through 7; anything at or
/// above the last bound is code 8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct IncomeBrackets {
    bounds: [u64; INCOME_BOUNDARY_COUNT],
}

impl IncomeBrackets {
    pub const BOUNDARY_COUNT: usize = INCOME_BOUNDARY_COUNT;

    /// Returns `None` unless exactly seven strictly ascending bounds are given.
    pub fn new(bounds: &[u64]) -> Option<Self> {
        let bounds: [u64; Self::BOUNDARY_COUNT] = bounds.try_into().ok()?;
        if bounds.windows(2).all(|pair| pair[0] < pair[1]) {
            Some(Self { bounds })
        } else {
            None
        }
    }

    pub fn code_for(&self, amount: u64) -> u8 {
        code_for_bounds(&self.bounds, amount)
    }

    pub fn top_threshold(&self) -> u64 {
        self.bounds[Self::BOUNDARY_COUNT - 1]
    }

    pub fn bounds(&self) -> &[u64] {
        &self.bounds
    }
}

impl Default for IncomeBrackets {
    /// Annual household income in rupiah.
    fn default() -> Self {
        Self {
            bounds: [
                15_000_000,
                25_000_000,
                35_000_000,
                50_000_000,
                75_000_000,
                100_000_000,
                150_000_000,
            ],
        }
    }
}

impl TryFrom<Vec<u64>> for IncomeBrackets {
    type Error = String;

    fn try_from(value: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| {
            format!(
                "income brackets need {} strictly ascending bounds",
                Self::BOUNDARY_COUNT
            )
        })
    }
}

impl From<IncomeBrackets> for Vec<u64> {
    fn from(value: IncomeBrackets) -> Self {
        value.bounds.to_vec()
    }
}
