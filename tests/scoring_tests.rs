/// Scenario tests for the scoring pipeline
/// Covers rule-only scoring and the response parsing rules of the AI layer
use lead_scoring_api::classifier::{KeywordResponseParser, ResponseParser};
use lead_scoring_api::models::{Intent, Lead, Offer};
use lead_scoring_api::pipeline::ScoringPipeline;
use lead_scoring_api::rules::breakdown;

fn crm_offer() -> Offer {
    Offer {
        name: "CRM Pro".to_string(),
        value_props: vec!["automation".to_string()],
        ideal_use_cases: vec!["SaaS".to_string()],
    }
}

fn vp_lead() -> Lead {
    Lead {
        name: Some("Ava Patel".to_string()),
        role: Some("VP Sales".to_string()),
        company: Some("FlowMetrics".to_string()),
        industry: Some("SaaS".to_string()),
        location: Some("Austin".to_string()),
        linkedin_bio: Some("Scaling revenue teams".to_string()),
    }
}

#[cfg(test)]
mod rule_only_tests {
    use super::*;

    #[tokio::test]
    async fn test_decision_maker_in_target_industry() {
        let scores = ScoringPipeline::rule_only()
            .run(&[vp_lead()], Some(&crm_offer()))
            .await
            .unwrap();

        assert_eq!(scores[0].score, 50);
        assert_eq!(scores[0].intent, Intent::Medium);
        assert_eq!(scores[0].reasoning, "Rule-based score only.");
    }

    #[tokio::test]
    async fn test_analyst_outside_target_industry() {
        let lead = Lead {
            role: Some("Analyst".to_string()),
            industry: Some("Retail".to_string()),
            location: Some(String::new()),
            ..vp_lead()
        };

        let parts = breakdown(&lead, &crm_offer());
        assert_eq!((parts.role, parts.industry, parts.completeness), (0, 0, 0));

        let scores = ScoringPipeline::rule_only()
            .run(&[lead.clone()], Some(&crm_offer()))
            .await
            .unwrap();

        assert_eq!(scores[0].score, 0);
        assert_eq!(scores[0].intent, Intent::Low);
        assert_eq!(scores[0].lead, lead);
    }

    #[tokio::test]
    async fn test_senior_adjacent_lead() {
        let offer = Offer {
            ideal_use_cases: vec!["B2B SaaS".to_string()],
            ..crm_offer()
        };
        let lead = Lead {
            role: Some("Senior Engineer".to_string()),
            industry: Some("Vertical SaaS".to_string()),
            ..vp_lead()
        };

        let scores = ScoringPipeline::rule_only()
            .run(&[lead], Some(&offer))
            .await
            .unwrap();

        // 10 role + 10 adjacent industry + 10 completeness
        assert_eq!(scores[0].score, 30);
        assert_eq!(scores[0].intent, Intent::Low);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let pipeline = ScoringPipeline::rule_only();
        let leads = vec![vp_lead(), Lead::default()];

        let first = pipeline.run(&leads, Some(&crm_offer())).await.unwrap();
        let second = pipeline.run(&leads, Some(&crm_offer())).await.unwrap();
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod response_parsing_tests {
    use super::*;

    #[test]
    fn test_low_answer() {
        let parsed = KeywordResponseParser.parse("Low because budget constraints are unclear");
        assert_eq!(parsed.intent, Some(Intent::Low));
    }

    #[test]
    fn test_high_beats_low() {
        let parsed = KeywordResponseParser.parse("Low risk, High intent");
        assert_eq!(parsed.intent, Some(Intent::High));
    }

    #[test]
    fn test_multi_line_reasoning_is_joined() {
        let parsed =
            KeywordResponseParser.parse("Classification: High\nExplanation: VP at a SaaS firm.\nStrong fit.");
        assert_eq!(parsed.reasoning, "Explanation: VP at a SaaS firm. Strong fit.");
    }
}
