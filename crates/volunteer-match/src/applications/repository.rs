use chrono::{DateTime, Utc};

use crate::domain::{OpportunityId, VolunteerId};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};

/// Storage abstraction so the service can be exercised against in-memory fakes.
///
/// `insert` must refuse a second record for the same (volunteer, opportunity)
/// pair with [`RepositoryError::Conflict`]. `set_status` applies
/// [`ApplicationRecord::transition`] to the stored record while holding the
/// store's write guard.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn find_by_pair(
        &self,
        volunteer: &VolunteerId,
        opportunity: &OpportunityId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn for_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn for_volunteer(&self, volunteer: &VolunteerId)
        -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
