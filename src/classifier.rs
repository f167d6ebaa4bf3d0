//! AI layer of lead scoring.
//!
//! Asks a text-generation service to judge a lead's buying intent against an
//! offer, then turns the free-text answer into an intent, a point contribution
//! and a short explanation. Failures never escape: a lead whose call fails is
//! reported with the fallback reasoning and zero points.

use crate::completion_client::CompletionClient;
use crate::models::{Intent, Lead, Offer};
use std::sync::Arc;

pub const FALLBACK_REASONING: &str = "AI scoring disabled or failed.";

pub const HIGH_INTENT_POINTS: u32 = 50;
pub const MEDIUM_INTENT_POINTS: u32 = 30;
pub const LOW_INTENT_POINTS: u32 = 10;

/// Structured reading of one model answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedJudgment {
    pub intent: Option<Intent>,
    pub reasoning: String,
}

/// Turns a raw completion into a judgment.
pub trait ResponseParser: Send + Sync {
    fn parse(&self, response: &str) -> ParsedJudgment;
}

/// Looks for the literal labels "High", "Medium", "Low" in that order.
///
/// The first label found wins, so "High ... Low" reads as High. The reasoning
/// is everything after the first line, or the whole answer if it is one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponseParser;

impl ResponseParser for KeywordResponseParser {
    fn parse(&self, response: &str) -> ParsedJudgment {
        let intent = [Intent::High, Intent::Medium, Intent::Low]
            .into_iter()
            .find(|intent| response.contains(intent.as_str()));

        let lines: Vec<&str> = response.split('\n').collect();
        let reasoning = if lines.len() > 1 {
            lines[1..].join(" ")
        } else {
            response.to_string()
        };

        ParsedJudgment { intent, reasoning }
    }
}

/// Outcome of classifying one lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub points: u32,
    pub reasoning: String,
    /// Whether a service credential was configured at all.
    pub available: bool,
}

impl Classification {
    fn fallback(available: bool) -> Self {
        Self {
            intent: Intent::Medium,
            points: 0,
            reasoning: FALLBACK_REASONING.to_string(),
            available,
        }
    }
}

pub fn intent_points(intent: Intent) -> u32 {
    match intent {
        Intent::High => HIGH_INTENT_POINTS,
        Intent::Medium => MEDIUM_INTENT_POINTS,
        Intent::Low => LOW_INTENT_POINTS,
    }
}

pub struct IntentClassifier {
    client: Option<Arc<dyn CompletionClient>>,
    parser: Box<dyn ResponseParser>,
}

impl IntentClassifier {
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self::with_parser(client, Box::new(KeywordResponseParser))
    }

    pub fn with_parser(
        client: Option<Arc<dyn CompletionClient>>,
        parser: Box<dyn ResponseParser>,
    ) -> Self {
        Self { client, parser }
    }

    /// Classifier with no backing service; every lead gets the fallback.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub async fn classify(&self, lead: &Lead, offer: &Offer) -> Classification {
        let Some(client) = &self.client else {
            return Classification::fallback(false);
        };

        let prompt = build_prompt(lead, offer);
        match client.complete(&prompt).await {
            Ok(response) => {
                let judgment = self.parser.parse(response.trim());
                let (intent, points) = match judgment.intent {
                    Some(intent) => (intent, intent_points(intent)),
                    None => (Intent::Medium, 0),
                };
                Classification {
                    intent,
                    points,
                    reasoning: judgment.reasoning,
                    available: true,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Error during AI scoring for lead {:?}: {}",
                    lead.name.as_deref().unwrap_or("<unnamed>"),
                    e
                );
                Classification::fallback(true)
            }
        }
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

pub fn build_prompt(lead: &Lead, offer: &Offer) -> String {
    format!(
        "Given the following product offer and prospect information, classify the prospect's \
buying intent as High, Medium, or Low. Also, provide a 1-2 sentence explanation for your \
classification.

Product/Offer:
- Name: {}
- Value Propositions: {}
- Ideal Use Cases: {}

Prospect:
- Name: {}
- Role: {}
- Company: {}
- Industry: {}
- Location: {}
- LinkedIn Bio: {}

Classification and Explanation:",
        offer.name,
        offer.value_props.join(", "),
        offer.ideal_use_cases.join(", "),
        field(&lead.name),
        field(&lead.role),
        field(&lead.company),
        field(&lead.industry),
        field(&lead.location),
        field(&lead.linkedin_bio),
    )
}
