//! Deterministic volunteer/opportunity fit scoring.
//!
//! Six independent dimension scorers are summed, clamped to 100 and rounded.
//! Nothing here performs I/O or holds state, so callers may score many
//! opportunities concurrently without coordination.

mod geo;
mod ranking;
mod recommendations;
mod router;
mod rules;
pub mod weights;

pub use geo::{haversine_km, GeoPoint};
pub use ranking::{rank_opportunities, RankedOpportunity};
pub use router::{match_router, RankRequest, RankResponse, ScoreRequest, ScoreResponse};
pub use recommendations::{
    match_label, MatchLabel, DEVELOP_SKILLS, GREAT_MATCH, NEEDS_MORE_TIME, PERFECT_MATCH,
};

use serde::{Deserialize, Serialize};

use crate::domain::{OpportunityRecord, VolunteerProfile};
use weights::TOTAL_MAX;

/// Per-dimension contribution to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub skills: f64,
    pub availability: f64,
    pub location: f64,
    pub cause: f64,
    pub commitment: f64,
    pub personalization: f64,
}

impl MatchBreakdown {
    pub fn sum(&self) -> f64 {
        self.skills
            + self.availability
            + self.location
            + self.cause
            + self.commitment
            + self.personalization
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScoreResult {
    pub total_score: u8,
    pub breakdown: MatchBreakdown,
    pub recommendations: Vec<String>,
}

impl MatchScoreResult {
    pub fn label(&self) -> MatchLabel {
        match_label(self.total_score)
    }
}

/// Scores how well `opportunity` fits `volunteer`.
///
/// The total is `round(min(100, sum))`, rounding halves away from zero.
/// Recommendations see the clamped total before rounding.
pub fn calculate_match_score(
    volunteer: &VolunteerProfile,
    opportunity: &OpportunityRecord,
) -> MatchScoreResult {
    let breakdown = MatchBreakdown {
        skills: rules::skill_score(volunteer.skills.as_deref(), &opportunity.skills),
        availability: rules::availability_score(
            volunteer.availability.as_ref(),
            &opportunity.schedule,
        ),
        location: rules::location_score(&volunteer.location, &opportunity.location),
        cause: rules::cause_score(volunteer.causes.as_deref(), &opportunity.cause),
        commitment: rules::commitment_score(volunteer.commitment, &opportunity.schedule),
        personalization: rules::personalization_score(
            &volunteer.preferences.preferred_issuers,
            &volunteer.preferences.interaction_history,
            &opportunity.issuer_id,
        ),
    };

    let total = breakdown.sum().min(TOTAL_MAX);
    let recommendations = recommendations::generate(total, &breakdown);

    MatchScoreResult {
        total_score: total.max(0.0).round() as u8,
        breakdown,
        recommendations,
    }
}
