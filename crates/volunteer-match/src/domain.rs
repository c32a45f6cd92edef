use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::GeoPoint;

/// Identifier wrapper for volunteer profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VolunteerId(pub String);

/// Identifier wrapper for posted opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpportunityId(pub String);

/// Identifier of the organization that posted an opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssuerId(pub String);

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for IssuerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only snapshot of a volunteer profile as supplied by the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    pub id: VolunteerId,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub causes: Option<Vec<String>>,
    #[serde(default)]
    pub availability: Option<VolunteerAvailability>,
    pub location: VolunteerLocation,
    #[serde(default)]
    pub commitment: Option<Commitment>,
    #[serde(default)]
    pub preferences: VolunteerPreferences,
}

/// Weekly availability. Only `hours_per_week` takes part in scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolunteerAvailability {
    #[serde(default)]
    pub hours_per_week: Option<f64>,
    #[serde(default)]
    pub preferred_days: Vec<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolunteerLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

/// Preferred engagement duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Commitment {
    #[serde(rename = "One-time")]
    OneTime,
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolunteerPreferences {
    #[serde(default)]
    pub preferred_issuers: Vec<IssuerId>,
    #[serde(default)]
    pub interaction_history: Vec<Interaction>,
}

/// Past engagement with an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub opportunity_id: OpportunityId,
    pub action: InteractionAction,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Viewed,
    Applied,
    Completed,
}

impl InteractionAction {
    /// Whether the action reflects real engagement rather than browsing.
    pub fn is_engagement(self) -> bool {
        matches!(self, Self::Applied | Self::Completed)
    }
}

/// Read-only snapshot of an opportunity posting as supplied by the opportunity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub id: OpportunityId,
    pub issuer_id: IssuerId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skills: Vec<SkillRequirement>,
    pub cause: String,
    pub location: OpportunityLocation,
    pub schedule: OpportunitySchedule,
    #[serde(default)]
    pub status: OpportunityStatus,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl OpportunityRecord {
    /// Active postings whose deadline, if any, has not passed.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.status == OpportunityStatus::Active
            && self.deadline.map_or(true, |deadline| deadline >= now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub name: String,
    pub importance: SkillImportance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillImportance {
    Required,
    Preferred,
    Bonus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityLocation {
    #[serde(rename = "type")]
    pub kind: LocationKind,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationKind {
    Remote,
    OnSite,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySchedule {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub hours_required: f64,
    #[serde(default)]
    pub flexible: bool,
}

impl OpportunitySchedule {
    /// Length of the engagement in fractional days.
    pub fn duration_days(&self) -> f64 {
        const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
        (self.end_date - self.start_date).num_milliseconds() as f64 / MILLIS_PER_DAY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    Draft,
    #[default]
    Active,
    Filled,
    Completed,
    Cancelled,
}
