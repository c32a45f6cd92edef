use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{OpportunityId, VolunteerId};
use crate::matching::calculate_match_score;

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission};
use super::repository::{ApplicationRepository, RepositoryError};

/// Service scoring submissions and keeping one application per volunteer and opportunity.
pub struct ApplicationService<R> {
    repository: Arc<R>,
}

/// Outcome of [`ApplicationService::submit`].
#[derive(Debug, Clone)]
pub struct Submitted {
    pub record: ApplicationRecord,
    /// `false` when an earlier application for the same pair was returned.
    pub created: bool,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<Submitted, ApplicationServiceError> {
        self.submit_at(submission, Utc::now())
    }

    /// Score and record an application as of `now`.
    ///
    /// Repeat submissions return the stored record untouched.
    pub fn submit_at(
        &self,
        submission: ApplicationSubmission,
        now: DateTime<Utc>,
    ) -> Result<Submitted, ApplicationServiceError> {
        let ApplicationSubmission {
            volunteer,
            opportunity,
            message,
        } = submission;

        if let Some(existing) = self.repository.find_by_pair(&volunteer.id, &opportunity.id)? {
            debug!(application_id = %existing.id.0, "returning existing application");
            return Ok(Submitted {
                record: existing,
                created: false,
            });
        }

        if !opportunity.accepts_applications(now) {
            return Err(ApplicationServiceError::OpportunityClosed(opportunity.id));
        }

        let result = calculate_match_score(&volunteer, &opportunity);
        let record = ApplicationRecord {
            id: next_application_id(),
            volunteer_id: volunteer.id.clone(),
            opportunity_id: opportunity.id.clone(),
            issuer_id: opportunity.issuer_id.clone(),
            status: ApplicationStatus::Applied,
            match_score: result.total_score,
            match_breakdown: result.breakdown,
            applied_at: now,
            shortlisted_at: None,
            confirmed_at: None,
            completed_at: None,
            volunteer_message: message,
        };

        match self.repository.insert(record) {
            Ok(stored) => {
                info!(
                    application_id = %stored.id.0,
                    volunteer_id = %stored.volunteer_id,
                    opportunity_id = %stored.opportunity_id,
                    match_score = stored.match_score,
                    "application created"
                );
                Ok(Submitted {
                    record: stored,
                    created: true,
                })
            }
            Err(RepositoryError::Conflict) => {
                let existing = self
                    .repository
                    .find_by_pair(&volunteer.id, &opportunity.id)?
                    .ok_or(RepositoryError::Conflict)?;
                debug!(
                    application_id = %existing.id.0,
                    "concurrent submission resolved to existing application"
                );
                Ok(Submitted {
                    record: existing,
                    created: false,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.update_status_at(application_id, status, Utc::now())
    }

    pub fn update_status_at(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
        now: DateTime<Utc>,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self.repository.set_status(application_id, status, now)?;

        info!(
            application_id = %application_id.0,
            status = status.label(),
            "application status updated"
        );
        Ok(record)
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Applications received for an opportunity, newest first.
    pub fn for_opportunity(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        let mut records = self.repository.for_opportunity(opportunity_id)?;
        records.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }

    pub fn count_for_opportunity(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<usize, ApplicationServiceError> {
        Ok(self.repository.for_opportunity(opportunity_id)?.len())
    }

    /// A volunteer's live applications grouped by status, newest first within a status.
    pub fn for_volunteer(
        &self,
        volunteer_id: &VolunteerId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        let mut records: Vec<ApplicationRecord> = self
            .repository
            .for_volunteer(volunteer_id)?
            .into_iter()
            .filter(|record| record.status != ApplicationStatus::Withdrawn)
            .collect();
        records.sort_by(|a, b| {
            a.status
                .cmp(&b.status)
                .then_with(|| b.applied_at.cmp(&a.applied_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("opportunity {0} is not accepting applications")]
    OpportunityClosed(OpportunityId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
