use crate::models::{Lead, LeadScore, Offer};

/// In-memory state for the current offer, lead batch and latest results.
///
/// Lives for the process lifetime only. Uploading a new batch drops the
/// results of the previous one; a new scoring run replaces results wholesale.
#[derive(Debug, Default)]
pub struct ScoringStore {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    scores: Vec<LeadScore>,
}

impl ScoringStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn set_offer(&mut self, offer: Offer) {
        self.offer = Some(offer);
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn replace_leads(&mut self, leads: Vec<Lead>) {
        self.leads = leads;
        self.scores.clear();
    }

    pub fn scores(&self) -> &[LeadScore] {
        &self.scores
    }

    pub fn replace_scores(&mut self, scores: Vec<LeadScore>) {
        self.scores = scores;
    }
}
