use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{IssuerId, OpportunityId, OpportunityRecord, VolunteerId, VolunteerProfile};
use crate::matching::{match_label, MatchBreakdown, MatchLabel};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Lifecycle of an application, in the order it normally progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Confirmed,
    Completed,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Confirmed => "confirmed",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

/// Payload a volunteer sends when applying; the score is computed server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub volunteer: VolunteerProfile,
    pub opportunity: OpportunityRecord,
    #[serde(default)]
    pub message: Option<String>,
}

/// Persisted application. Identity, score and `applied_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub volunteer_id: VolunteerId,
    pub opportunity_id: OpportunityId,
    pub issuer_id: IssuerId,
    pub status: ApplicationStatus,
    pub match_score: u8,
    pub match_breakdown: MatchBreakdown,
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortlisted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer_message: Option<String>,
}

impl ApplicationRecord {
    pub fn match_label(&self) -> MatchLabel {
        match_label(self.match_score)
    }

    /// Moves to `status`, stamping the milestone timestamp where one exists.
    pub fn transition(&mut self, status: ApplicationStatus, at: DateTime<Utc>) {
        self.status = status;
        match status {
            ApplicationStatus::Shortlisted => self.shortlisted_at = Some(at),
            ApplicationStatus::Confirmed => self.confirmed_at = Some(at),
            ApplicationStatus::Completed => self.completed_at = Some(at),
            ApplicationStatus::Applied
            | ApplicationStatus::Rejected
            | ApplicationStatus::Withdrawn => {}
        }
    }

    pub fn view(&self) -> ApplicationView {
        ApplicationView {
            application_id: self.id.clone(),
            volunteer_id: self.volunteer_id.clone(),
            opportunity_id: self.opportunity_id.clone(),
            issuer_id: self.issuer_id.clone(),
            status: self.status.label(),
            match_score: self.match_score,
            match_label: self.match_label(),
            match_breakdown: self.match_breakdown,
            applied_at: self.applied_at,
            shortlisted_at: self.shortlisted_at,
            confirmed_at: self.confirmed_at,
            completed_at: self.completed_at,
            volunteer_message: self.volunteer_message.clone(),
        }
    }
}

/// Response shape for application endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub volunteer_id: VolunteerId,
    pub opportunity_id: OpportunityId,
    pub issuer_id: IssuerId,
    pub status: &'static str,
    pub match_score: u8,
    pub match_label: MatchLabel,
    pub match_breakdown: MatchBreakdown,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortlisted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteer_message: Option<String>,
}
