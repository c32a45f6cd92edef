use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, Utc};
use volunteer_match::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus, RepositoryError,
};
use volunteer_match::domain::{OpportunityId, VolunteerId};

type RecordMap = HashMap<ApplicationId, ApplicationRecord>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the document store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<RecordMap>>,
}

impl InMemoryApplicationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, RecordMap>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }

    fn matching<F>(&self, predicate: F) -> Result<Vec<ApplicationRecord>, RepositoryError>
    where
        F: Fn(&ApplicationRecord) -> bool,
    {
        let guard = self.lock()?;
        Ok(guard
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let pair_taken = guard.values().any(|existing| {
            existing.volunteer_id == record.volunteer_id
                && existing.opportunity_id == record.opportunity_id
        });
        if pair_taken || guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.transition(status, at);
        Ok(record.clone())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn find_by_pair(
        &self,
        volunteer: &VolunteerId,
        opportunity: &OpportunityId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.matching(|record| {
            &record.volunteer_id == volunteer && &record.opportunity_id == opportunity
        })?
        .into_iter()
        .next())
    }

    fn for_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.matching(|record| &record.opportunity_id == opportunity)
    }

    fn for_volunteer(
        &self,
        volunteer: &VolunteerId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.matching(|record| &record.volunteer_id == volunteer)
    }
}
