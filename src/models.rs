use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The product being sold in a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub value_props: Vec<String>,
    pub ideal_use_cases: Vec<String>,
}

/// A prospect record. Leads carry no identity; a batch is ordered by upload position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin_bio: Option<String>,
}

impl Lead {
    /// Column names a lead upload must provide.
    pub const FIELDS: [&'static str; 6] = [
        "name",
        "role",
        "company",
        "industry",
        "location",
        "linkedin_bio",
    ];

    /// All six fields, absent ones as `None`, in `FIELDS` order.
    pub fn fields(&self) -> [Option<&str>; 6] {
        [
            self.name.as_deref(),
            self.role.as_deref(),
            self.company.as_deref(),
            self.industry.as_deref(),
            self.location.as_deref(),
            self.linkedin_bio.as_deref(),
        ]
    }

    /// True when every field is present and non-empty.
    pub fn is_complete(&self) -> bool {
        self.fields()
            .iter()
            .all(|field| field.is_some_and(|value| !value.is_empty()))
    }
}

/// Discrete buying-likelihood classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    High,
    Medium,
    Low,
}

impl Intent {
    /// Threshold bucketing used when the AI layer is disabled.
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            Intent::High
        } else if score >= 40 {
            Intent::Medium
        } else {
            Intent::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::High => "High",
            Intent::Medium => "Medium",
            Intent::Low => "Low",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring result for one lead: the lead's own fields plus the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    #[serde(flatten)]
    pub lead: Lead,
    pub intent: Intent,
    pub score: u32,
    pub reasoning: String,
}

/// POST /offer response.
#[derive(Debug, Serialize, Deserialize)]
pub struct OfferResponse {
    pub message: String,
    pub offer: Offer,
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Per-intent tally of a scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntentCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl IntentCounts {
    pub fn tally(scores: &[LeadScore]) -> Self {
        scores.iter().fold(Self::default(), |mut counts, score| {
            match score.intent {
                Intent::High => counts.high += 1,
                Intent::Medium => counts.medium += 1,
                Intent::Low => counts.low += 1,
            }
            counts
        })
    }
}

/// POST /score response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoringRunSummary {
    pub message: String,
    pub scored_at: DateTime<Utc>,
    pub intents: IntentCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_thresholds() {
        assert_eq!(Intent::from_score(100), Intent::High);
        assert_eq!(Intent::from_score(70), Intent::High);
        assert_eq!(Intent::from_score(69), Intent::Medium);
        assert_eq!(Intent::from_score(40), Intent::Medium);
        assert_eq!(Intent::from_score(39), Intent::Low);
        assert_eq!(Intent::from_score(0), Intent::Low);
    }

    #[test]
    fn test_lead_score_serializes_flat() {
        let score = LeadScore {
            lead: Lead {
                name: Some("Ava Patel".to_string()),
                role: Some("Head of Growth".to_string()),
                ..Lead::default()
            },
            intent: Intent::High,
            score: 85,
            reasoning: "Strong fit".to_string(),
        };

        let value = serde_json::to_value(&score).unwrap();
        assert_eq!(value["name"], "Ava Patel");
        assert_eq!(value["role"], "Head of Growth");
        assert!(value["company"].is_null());
        assert_eq!(value["intent"], "High");
        assert_eq!(value["score"], 85);
        assert_eq!(value["reasoning"], "Strong fit");
    }

    #[test]
    fn test_completeness_rejects_empty_strings() {
        let mut lead = Lead {
            name: Some("Ava".to_string()),
            role: Some("CTO".to_string()),
            company: Some("FlowMetrics".to_string()),
            industry: Some("SaaS".to_string()),
            location: Some("Berlin".to_string()),
            linkedin_bio: Some("Builder".to_string()),
        };
        assert!(lead.is_complete());

        lead.location = Some(String::new());
        assert!(!lead.is_complete());

        lead.location = None;
        assert!(!lead.is_complete());
    }

    #[test]
    fn test_intent_counts() {
        let make = |intent| LeadScore {
            lead: Lead::default(),
            intent,
            score: 0,
            reasoning: String::new(),
        };
        let scores = vec![make(Intent::High), make(Intent::Low), make(Intent::Low)];

        let counts = IntentCounts::tally(&scores);
        assert_eq!(
            counts,
            IntentCounts {
                high: 1,
                medium: 0,
                low: 2
            }
        );
    }
}
