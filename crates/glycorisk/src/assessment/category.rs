use serde::{Deserialize, Serialize};

/// Five ordered severity bands over the final probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

/// Inclusive lower bounds, ascending; each band ends where the next begins.
const BAND_LOWER_BOUNDS: [(f64, RiskCategory); 4] = [
    (0.30, RiskCategory::Low),
    (0.50, RiskCategory::Moderate),
    (0.70, RiskCategory::High),
    (0.85, RiskCategory::VeryHigh),
];

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::VeryLow,
        RiskCategory::Low,
        RiskCategory::Moderate,
        RiskCategory::High,
        RiskCategory::VeryHigh,
    ];

    pub fn from_probability(probability: f64) -> Self {
        BAND_LOWER_BOUNDS
            .iter()
            .rev()
            .find(|(lower, _)| probability >= *lower)
            .map(|(_, category)| *category)
            .unwrap_or(RiskCategory::VeryLow)
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::VeryLow => "Very Low",
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::VeryHigh => "Very High",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskCategory::VeryLow => "green",
            RiskCategory::Low => "lightgreen",
            RiskCategory::Moderate => "orange",
            RiskCategory::High => "darkorange",
            RiskCategory::VeryHigh => "red",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskCategory::VeryLow => "😊",
            RiskCategory::Low => "🙂",
            RiskCategory::Moderate => "😐",
            RiskCategory::High => "😕",
            RiskCategory::VeryHigh => "😞",
        }
    }

    pub fn display(self) -> CategoryDisplay {
        CategoryDisplay {
            category: self,
            label: self.label(),
            color: self.color(),
            icon: self.icon(),
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation tokens for a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDisplay {
    pub category: RiskCategory,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_belong_to_the_higher_band() {
        assert_eq!(RiskCategory::from_probability(0.0), RiskCategory::VeryLow);
        assert_eq!(RiskCategory::from_probability(0.2999), RiskCategory::VeryLow);
        assert_eq!(RiskCategory::from_probability(0.30), RiskCategory::Low);
        assert_eq!(RiskCategory::from_probability(0.4999), RiskCategory::Low);
        assert_eq!(RiskCategory::from_probability(0.50), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_probability(0.70), RiskCategory::High);
        assert_eq!(RiskCategory::from_probability(0.8499), RiskCategory::High);
        assert_eq!(RiskCategory::from_probability(0.85), RiskCategory::VeryHigh);
        assert_eq!(RiskCategory::from_probability(1.0), RiskCategory::VeryHigh);
    }

    #[test]
    fn display_tokens_match_band() {
        let display = RiskCategory::from_probability(0.86).display();
        assert_eq!(display.label, "Very High");
        assert_eq!(display.color, "red");
        assert_eq!(display.icon, "😞");
        assert_eq!(RiskCategory::Moderate.to_string(), "Moderate");
    }

    proptest! {
        #[test]
        fn bands_are_ordered_with_probability(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(RiskCategory::from_probability(low) <= RiskCategory::from_probability(high));
        }
    }
}
