//! Deterministic rule layer of lead scoring.
//!
//! Scores a lead on three independent criteria:
//! 1. Role seniority (20 for decision makers, 10 for senior individual contributors)
//! 2. Industry fit against the offer's ideal use cases (20 exact, 10 adjacent)
//! 3. Data completeness (10 when every field is filled in)
//!
//! All comparisons are case-insensitive and absent fields count as empty strings.

use crate::models::{Lead, Offer};
use serde::{Deserialize, Serialize};

const DECISION_MAKER_KEYWORDS: [&str; 10] = [
    "head", "vp", "director", "manager", "chief", "founder", "ceo", "cto", "cfo", "coo",
];
const INFLUENCER_KEYWORDS: [&str; 3] = ["senior", "lead", "principal"];

pub const DECISION_MAKER_POINTS: u32 = 20;
pub const INFLUENCER_POINTS: u32 = 10;
pub const EXACT_INDUSTRY_POINTS: u32 = 20;
pub const ADJACENT_INDUSTRY_POINTS: u32 = 10;
pub const COMPLETENESS_POINTS: u32 = 10;

/// Per-criterion contributions, kept for explaining a rule score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBreakdown {
    pub role: u32,
    pub industry: u32,
    pub completeness: u32,
}

impl RuleBreakdown {
    pub fn total(&self) -> u32 {
        self.role + self.industry + self.completeness
    }
}

/// Rule score in `[0, 50]`.
pub fn evaluate(lead: &Lead, offer: &Offer) -> u32 {
    breakdown(lead, offer).total()
}

pub fn breakdown(lead: &Lead, offer: &Offer) -> RuleBreakdown {
    RuleBreakdown {
        role: role_points(lead.role.as_deref()),
        industry: industry_points(lead.industry.as_deref(), &offer.ideal_use_cases),
        completeness: if lead.is_complete() {
            COMPLETENESS_POINTS
        } else {
            0
        },
    }
}

fn role_points(role: Option<&str>) -> u32 {
    let role = role.unwrap_or_default().to_lowercase();

    if DECISION_MAKER_KEYWORDS.iter().any(|k| role.contains(k)) {
        DECISION_MAKER_POINTS
    } else if INFLUENCER_KEYWORDS.iter().any(|k| role.contains(k)) {
        INFLUENCER_POINTS
    } else {
        0
    }
}

fn industry_points(industry: Option<&str>, ideal_use_cases: &[String]) -> u32 {
    let industry = industry.unwrap_or_default().to_lowercase();

    let exact = ideal_use_cases
        .iter()
        .any(|use_case| use_case.to_lowercase() == industry);
    if exact {
        return EXACT_INDUSTRY_POINTS;
    }

    let adjacent = ideal_use_cases.iter().any(|use_case| {
        use_case
            .split_whitespace()
            .any(|word| industry.contains(&word.to_lowercase()))
    });
    if adjacent {
        ADJACENT_INDUSTRY_POINTS
    } else {
        0
    }
}
