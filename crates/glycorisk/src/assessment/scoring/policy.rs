use serde::{Deserialize, Serialize};

/// Severity tier whose probability floor was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideBand {
    Watch,
    Elevated,
    Critical,
}

impl OverrideBand {
    pub fn label(self) -> &'static str {
        match self {
            OverrideBand::Watch => "watch",
            OverrideBand::Elevated => "elevated",
            OverrideBand::Critical => "critical",
        }
    }
}

/// Scores at or above `min_score` raise the probability to at least `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverrideTier {
    pub min_score: u32,
    pub floor: f64,
    pub band: OverrideBand,
}

/// Banded probability floors keyed by the heuristic risk score.
#[derive(Debug, Clone, PartialEq)]
pub struct OverridePolicy {
    tiers: Vec<OverrideTier>,
}

impl OverridePolicy {
    /// Tiers are kept ordered by descending `min_score` so the first match is
    /// the highest tier the score reaches.
    pub fn new(mut tiers: Vec<OverrideTier>) -> Self {
        tiers.sort_by(|a, b| b.min_score.cmp(&a.min_score));
        Self { tiers }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            OverrideTier {
                min_score: 6,
                floor: 0.86,
                band: OverrideBand::Critical,
            },
            OverrideTier {
                min_score: 4,
                floor: 0.72,
                band: OverrideBand::Elevated,
            },
            OverrideTier {
                min_score: 2,
                floor: 0.55,
                band: OverrideBand::Watch,
            },
        ])
    }

    pub fn tiers(&self) -> &[OverrideTier] {
        &self.tiers
    }

    pub fn tier_for(&self, score: u32) -> Option<&OverrideTier> {
        self.tiers.iter().find(|tier| score >= tier.min_score)
    }

    /// Combines the classifier output with the floor for `score`. The result
    /// is never below `raw_probability`.
    pub fn apply(&self, raw_probability: f64, score: u32) -> ProbabilityAdjustment {
        let Some(tier) = self.tier_for(score) else {
            return ProbabilityAdjustment {
                raw_probability,
                final_probability: raw_probability,
                tier: None,
                notice: None,
            };
        };

        let final_probability = raw_probability.max(tier.floor);
        let notice = (final_probability > raw_probability).then(|| {
            format!(
                "Risk adjusted upward from {:.1}% to {:.1}% because several clinical risk factors are present (risk score {}, {} tier).",
                raw_probability * 100.0,
                final_probability * 100.0,
                score,
                tier.band.label()
            )
        });

        ProbabilityAdjustment {
            raw_probability,
            final_probability,
            tier: Some(*tier),
            notice,
        }
    }
}

impl Default for OverridePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Raw and guarded probabilities for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityAdjustment {
    pub raw_probability: f64,
    pub final_probability: f64,
    pub tier: Option<OverrideTier>,
    pub notice: Option<String>,
}

impl ProbabilityAdjustment {
    pub fn floor_was_binding(&self) -> bool {
        self.final_probability > self.raw_probability
    }
}
