use crate::domain::{
    Commitment, Interaction, IssuerId, LocationKind, OpportunityLocation, OpportunitySchedule,
    SkillRequirement, VolunteerAvailability, VolunteerLocation,
};

use super::geo::haversine_km;
use super::weights::*;

pub(crate) fn skill_score(
    volunteer_skills: Option<&[String]>,
    requirements: &[SkillRequirement],
) -> f64 {
    if requirements.is_empty() {
        return SKILLS_MAX;
    }

    let volunteer_skills = volunteer_skills.unwrap_or_default();
    if volunteer_skills.is_empty() {
        return 0.0;
    }

    let mut achieved = 0.0;
    let mut max_possible = 0.0;
    for requirement in requirements {
        let weight = skill_weight(requirement.importance);
        max_possible += weight;
        if volunteer_skills
            .iter()
            .any(|skill| skill.to_lowercase() == requirement.name.to_lowercase())
        {
            achieved += weight;
        }
    }

    if max_possible > 0.0 {
        achieved / max_possible * SKILLS_MAX
    } else {
        0.0
    }
}

pub(crate) fn availability_score(
    availability: Option<&VolunteerAvailability>,
    schedule: &OpportunitySchedule,
) -> f64 {
    let hours_available = availability
        .and_then(|availability| availability.hours_per_week)
        .filter(|hours| *hours > 0.0);
    let Some(hours_available) = hours_available else {
        return AVAILABILITY_UNKNOWN;
    };

    let hours_needed = schedule.hours_required;
    AVAILABILITY_BANDS
        .iter()
        .find(|(fraction, _)| hours_available >= hours_needed * fraction)
        .map_or(AVAILABILITY_FLOOR, |(_, score)| *score)
}

pub(crate) fn location_score(
    volunteer: &VolunteerLocation,
    opportunity: &OpportunityLocation,
) -> f64 {
    if opportunity.kind == LocationKind::Remote || volunteer.remote {
        return LOCATION_REMOTE;
    }

    if present(opportunity.city.as_deref()) == Some(volunteer.city.as_str()) {
        return LOCATION_SAME_CITY;
    }

    if present(opportunity.state.as_deref()) == Some(volunteer.state.as_str()) {
        return LOCATION_SAME_STATE;
    }

    match (volunteer.coordinates, opportunity.coordinates) {
        (Some(from), Some(to)) => distance_score(haversine_km(from, to)),
        _ => LOCATION_FLOOR,
    }
}

/// Bands are half-open: a distance equal to a band edge scores in the next band out.
fn distance_score(distance_km: f64) -> f64 {
    DISTANCE_BANDS_KM
        .iter()
        .find(|(below_km, _)| distance_km < *below_km)
        .map_or(LOCATION_FLOOR, |(_, score)| *score)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub(crate) fn cause_score(volunteer_causes: Option<&[String]>, opportunity_cause: &str) -> f64 {
    let volunteer_causes = volunteer_causes.unwrap_or_default();
    if volunteer_causes.is_empty() {
        return CAUSE_NEUTRAL;
    }

    if volunteer_causes.iter().any(|cause| cause == opportunity_cause) {
        CAUSE_MATCH
    } else {
        CAUSE_NEUTRAL
    }
}

pub(crate) fn commitment_score(
    commitment: Option<Commitment>,
    schedule: &OpportunitySchedule,
) -> f64 {
    let Some(commitment) = commitment else {
        return COMMITMENT_NEUTRAL;
    };

    let duration_days = schedule.duration_days();
    let fits = match commitment {
        Commitment::LongTerm => duration_days > LONG_TERM_MIN_DAYS,
        Commitment::ShortTerm => duration_days <= SHORT_TERM_MAX_DAYS,
        Commitment::OneTime => duration_days <= ONE_TIME_MAX_DAYS,
    };

    if fits {
        COMMITMENT_MATCH
    } else {
        COMMITMENT_NEUTRAL
    }
}

pub(crate) fn personalization_score(
    preferred_issuers: &[IssuerId],
    history: &[Interaction],
    issuer: &IssuerId,
) -> f64 {
    if preferred_issuers.contains(issuer) {
        return PREFERRED_ISSUER_BONUS;
    }

    let engagements = history
        .iter()
        .filter(|interaction| interaction.action.is_engagement())
        .count();

    if engagements > ENGAGED_HISTORY_THRESHOLD {
        ENGAGED_HISTORY_BONUS
    } else {
        0.0
    }
}
