mod policy;
mod rules;

pub use policy::{OverrideBand, OverridePolicy, OverrideTier, ProbabilityAdjustment};
pub use rules::{ExclusiveGroup, RiskFactor, RiskRule, RiskRuleSet, RiskScore, ScoreComponent};

use super::features::EncodedFeatures;

/// Stateless clinical guardrail: scores the encoded answers and floors the
/// classifier probability accordingly.
#[derive(Debug, Clone, Default)]
pub struct GuardrailEngine {
    rules: RiskRuleSet,
    policy: OverridePolicy,
}

impl GuardrailEngine {
    pub fn new(rules: RiskRuleSet, policy: OverridePolicy) -> Self {
        Self { rules, policy }
    }

    pub fn score(&self, features: &EncodedFeatures) -> RiskScore {
        self.rules.evaluate(features)
    }

    pub fn guard(&self, features: &EncodedFeatures, raw_probability: f64) -> GuardrailOutcome {
        let score = self.score(features);
        let adjustment = self.policy.apply(raw_probability, score.total);

        if let Some(notice) = &adjustment.notice {
            tracing::info!(score = score.total, %notice, "probability floor applied");
        }

        GuardrailOutcome { score, adjustment }
    }

    pub fn rules(&self) -> &RiskRuleSet {
        &self.rules
    }

    pub fn policy(&self) -> &OverridePolicy {
        &self.policy
    }
}

/// Score and adjusted probability produced by [`GuardrailEngine::guard`].
#[derive(Debug, Clone, PartialEq)]
pub struct GuardrailOutcome {
    pub score: RiskScore,
    pub adjustment: ProbabilityAdjustment,
}
