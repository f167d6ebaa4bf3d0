use crate::classifier::IntentClassifier;
use crate::completion_client::{CompletionClient, OpenAiClient};
use crate::composer::ScoreComposer;
use crate::config::{AiMode, Config};
use crate::errors::AppError;
use crate::models::{Lead, LeadScore, Offer};
use crate::rules;
use std::sync::Arc;

pub const MISSING_OFFER_MESSAGE: &str =
    "Offer information is not set. Please POST to /offer first.";
pub const NO_LEADS_MESSAGE: &str =
    "No leads have been uploaded. Please POST to /leads/upload first.";

/// Scores a batch of leads against one offer.
pub struct ScoringPipeline {
    classifier: IntentClassifier,
    composer: ScoreComposer,
}

impl ScoringPipeline {
    pub fn new(classifier: IntentClassifier, composer: ScoreComposer) -> Self {
        Self {
            classifier,
            composer,
        }
    }

    /// Wires the OpenAI client when a key is configured, rule-only scoring otherwise.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let mode = config.ai_mode();
        let client = OpenAiClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn CompletionClient>);

        Ok(Self::new(
            IntentClassifier::new(client),
            ScoreComposer::new(mode),
        ))
    }

    /// Rule-only pipeline, no external calls.
    pub fn rule_only() -> Self {
        Self::new(IntentClassifier::disabled(), ScoreComposer::new(AiMode::Disabled))
    }

    pub fn ai_mode(&self) -> AiMode {
        self.composer.mode()
    }

    pub async fn score_lead(&self, lead: &Lead, offer: &Offer) -> LeadScore {
        let rule_score = rules::evaluate(lead, offer);
        let classification = self.classifier.classify(lead, offer).await;
        tracing::debug!(
            "Lead {:?}: rule score {}, AI {} (+{})",
            lead.name.as_deref().unwrap_or("<unnamed>"),
            rule_score,
            classification.intent,
            classification.points
        );

        self.composer
            .compose(rule_score, &classification)
            .into_lead_score(lead.clone())
    }

    /// Scores every lead in order, one classification call at a time.
    ///
    /// Refuses to run without an offer or with an empty batch.
    pub async fn run(
        &self,
        leads: &[Lead],
        offer: Option<&Offer>,
    ) -> Result<Vec<LeadScore>, AppError> {
        let offer =
            offer.ok_or_else(|| AppError::Precondition(MISSING_OFFER_MESSAGE.to_string()))?;
        if leads.is_empty() {
            return Err(AppError::Precondition(NO_LEADS_MESSAGE.to_string()));
        }

        tracing::info!(
            "Scoring {} leads against offer '{}' (AI {:?})",
            leads.len(),
            offer.name,
            self.ai_mode()
        );

        let mut scores = Vec::with_capacity(leads.len());
        for lead in leads {
            scores.push(self.score_lead(lead, offer).await);
        }

        tracing::info!("✓ Scoring complete for {} leads", scores.len());
        Ok(scores)
    }
}
