use crate::classifier::Classification;
use crate::config::AiMode;
use crate::models::{Intent, Lead, LeadScore};

pub const RULE_ONLY_REASONING: &str = "Rule-based score only.";

/// Final verdict for one lead before it is joined with the lead's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedScore {
    pub intent: Intent,
    pub score: u32,
    pub reasoning: String,
}

impl ComposedScore {
    pub fn into_lead_score(self, lead: Lead) -> LeadScore {
        LeadScore {
            lead,
            intent: self.intent,
            score: self.score,
            reasoning: self.reasoning,
        }
    }
}

/// Merges the rule score with the classifier's judgment.
///
/// With AI disabled the intent comes from score thresholds alone. With AI
/// enabled the classifier's intent and reasoning are kept as reported, including
/// the fallback values of a call that failed.
#[derive(Debug, Clone, Copy)]
pub struct ScoreComposer {
    mode: AiMode,
}

impl ScoreComposer {
    pub fn new(mode: AiMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn compose(&self, rule_score: u32, classification: &Classification) -> ComposedScore {
        let score = rule_score + classification.points;

        match self.mode {
            AiMode::Disabled => ComposedScore {
                intent: Intent::from_score(score),
                score,
                reasoning: RULE_ONLY_REASONING.to_string(),
            },
            AiMode::Enabled => ComposedScore {
                intent: classification.intent,
                score,
                reasoning: classification.reasoning.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FALLBACK_REASONING;

    fn classification(intent: Intent, points: u32, reasoning: &str) -> Classification {
        Classification {
            intent,
            points,
            reasoning: reasoning.to_string(),
            available: true,
        }
    }

    #[test]
    fn test_disabled_mode_uses_thresholds() {
        let composer = ScoreComposer::new(AiMode::Disabled);
        let fallback = classification(Intent::Medium, 0, FALLBACK_REASONING);

        let medium = composer.compose(50, &fallback);
        assert_eq!(medium.intent, Intent::Medium);
        assert_eq!(medium.score, 50);
        assert_eq!(medium.reasoning, "Rule-based score only.");

        assert_eq!(composer.compose(0, &fallback).intent, Intent::Low);
        assert_eq!(composer.compose(39, &fallback).intent, Intent::Low);
        assert_eq!(composer.compose(40, &fallback).intent, Intent::Medium);
    }

    #[test]
    fn test_disabled_mode_ignores_classifier_judgment() {
        let composer = ScoreComposer::new(AiMode::Disabled);
        let high = classification(Intent::High, 50, "Great fit");

        let result = composer.compose(30, &high);
        assert_eq!(result.score, 80);
        assert_eq!(result.intent, Intent::High);
        assert_eq!(result.reasoning, RULE_ONLY_REASONING);

        let low = classification(Intent::Low, 10, "Poor fit");
        let result = composer.compose(30, &low);
        assert_eq!(result.intent, Intent::Medium);
        assert_eq!(result.reasoning, RULE_ONLY_REASONING);
    }

    #[test]
    fn test_enabled_mode_keeps_classifier_verdict() {
        let composer = ScoreComposer::new(AiMode::Enabled);
        let low = classification(Intent::Low, 10, "Budget unclear");

        let result = composer.compose(50, &low);
        assert_eq!(
            result,
            ComposedScore {
                intent: Intent::Low,
                score: 60,
                reasoning: "Budget unclear".to_string(),
            }
        );
    }

    #[test]
    fn test_enabled_mode_does_not_rebucket_failed_calls() {
        let composer = ScoreComposer::new(AiMode::Enabled);
        let fallback = classification(Intent::Medium, 0, FALLBACK_REASONING);

        let result = composer.compose(0, &fallback);
        assert_eq!(result.intent, Intent::Medium);
        assert_eq!(result.score, 0);
        assert_eq!(result.reasoning, FALLBACK_REASONING);
    }

    #[test]
    fn test_compose_is_idempotent() {
        let composer = ScoreComposer::new(AiMode::Enabled);
        let high = classification(Intent::High, 50, "Strong");

        assert_eq!(composer.compose(20, &high), composer.compose(20, &high));
    }
}
