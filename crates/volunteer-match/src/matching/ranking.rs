use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{IssuerId, OpportunityId, OpportunityRecord, VolunteerProfile};

use super::{calculate_match_score, MatchBreakdown, MatchLabel};

/// One scored entry of a volunteer's browse list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOpportunity {
    pub opportunity_id: OpportunityId,
    pub issuer_id: IssuerId,
    pub title: String,
    pub total_score: u8,
    pub label: MatchLabel,
    pub breakdown: MatchBreakdown,
    pub recommendations: Vec<String>,
}

/// Scores every open opportunity for `volunteer`, best fit first.
///
/// Closed postings and those past their deadline at `now` are skipped. Equal
/// scores keep their input order.
pub fn rank_opportunities(
    volunteer: &VolunteerProfile,
    opportunities: &[OpportunityRecord],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<RankedOpportunity> {
    let mut ranked: Vec<RankedOpportunity> = opportunities
        .iter()
        .filter(|opportunity| opportunity.accepts_applications(now))
        .map(|opportunity| {
            let result = calculate_match_score(volunteer, opportunity);
            RankedOpportunity {
                opportunity_id: opportunity.id.clone(),
                issuer_id: opportunity.issuer_id.clone(),
                title: opportunity.title.clone(),
                total_score: result.total_score,
                label: result.label(),
                breakdown: result.breakdown,
                recommendations: result.recommendations,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    ranked.truncate(limit);
    ranked
}
