use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission,
};
use crate::applications::repository::{ApplicationRepository, RepositoryError};
use crate::applications::{application_router, ApplicationService};
use crate::domain::{
    Commitment, IssuerId, LocationKind, OpportunityId, OpportunityLocation, OpportunityRecord,
    OpportunitySchedule, OpportunityStatus, SkillImportance, SkillRequirement,
    VolunteerAvailability, VolunteerId, VolunteerLocation, VolunteerPreferences, VolunteerProfile,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
}

pub(super) fn volunteer(id: &str) -> VolunteerProfile {
    VolunteerProfile {
        id: VolunteerId(id.to_string()),
        skills: Some(vec!["Coding".to_string(), "Teaching".to_string()]),
        causes: Some(vec!["Education".to_string()]),
        availability: Some(VolunteerAvailability {
            hours_per_week: Some(10.0),
            preferred_days: vec!["Saturday".to_string()],
            preferred_time: Some("Morning".to_string()),
        }),
        location: VolunteerLocation {
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            remote: false,
            coordinates: None,
        },
        commitment: Some(Commitment::ShortTerm),
        preferences: VolunteerPreferences::default(),
    }
}

pub(super) fn opportunity(id: &str) -> OpportunityRecord {
    let start = now() + Duration::days(10);
    OpportunityRecord {
        id: OpportunityId(id.to_string()),
        issuer_id: IssuerId("ngo-1".to_string()),
        title: "Weekend coding club".to_string(),
        skills: vec![
            SkillRequirement {
                name: "Coding".to_string(),
                importance: SkillImportance::Required,
            },
            SkillRequirement {
                name: "Design".to_string(),
                importance: SkillImportance::Bonus,
            },
        ],
        cause: "Education".to_string(),
        location: OpportunityLocation {
            kind: LocationKind::OnSite,
            city: Some("Pune".to_string()),
            state: None,
            coordinates: None,
        },
        schedule: OpportunitySchedule {
            start_date: start,
            end_date: start + Duration::days(30),
            hours_required: 8.0,
            flexible: false,
        },
        status: OpportunityStatus::Active,
        deadline: None,
    }
}

pub(super) fn submission(volunteer_id: &str, opportunity_id: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        volunteer: volunteer(volunteer_id),
        opportunity: opportunity(opportunity_id),
        message: Some("Happy to help on weekends".to_string()),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.volunteer_id == record.volunteer_id
                && existing.opportunity_id == record.opportunity_id
        });
        if duplicate || guard.contains_key(&record.id) {
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
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.transition(status, at);
        Ok(record.clone())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_pair(
        &self,
        volunteer: &VolunteerId,
        opportunity: &OpportunityId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| {
                &record.volunteer_id == volunteer && &record.opportunity_id == opportunity
            })
            .cloned())
    }

    fn for_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.opportunity_id == opportunity)
            .cloned()
            .collect())
    }

    fn for_volunteer(
        &self,
        volunteer: &VolunteerId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.volunteer_id == volunteer)
            .cloned()
            .collect())
    }
}

/// Hides the stored record from the first pair lookup, simulating a
/// concurrent submission that wins the insert.
#[derive(Default)]
pub(super) struct RacingRepository {
    pub(super) inner: MemoryRepository,
    pub(super) hidden_once: AtomicBool,
}

impl ApplicationRepository for RacingRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.set_status(id, status, at)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_by_pair(
        &self,
        volunteer: &VolunteerId,
        opportunity: &OpportunityId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        if !self.hidden_once.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_pair(volunteer, opportunity)
    }

    fn for_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_opportunity(opportunity)
    }

    fn for_volunteer(
        &self,
        volunteer: &VolunteerId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_volunteer(volunteer)
    }
}

/// Holds every `set_status` call until `parties` callers have arrived, so
/// status changes from several threads hit the store together.
pub(super) struct BarrierRepository {
    pub(super) inner: MemoryRepository,
    barrier: Barrier,
}

impl BarrierRepository {
    pub(super) fn new(inner: MemoryRepository, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

impl ApplicationRepository for BarrierRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.barrier.wait();
        self.inner.set_status(id, status, at)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_by_pair(
        &self,
        volunteer: &VolunteerId,
        opportunity: &OpportunityId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.find_by_pair(volunteer, opportunity)
    }

    fn for_opportunity(
        &self,
        opportunity: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_opportunity(opportunity)
    }

    fn for_volunteer(
        &self,
        volunteer: &VolunteerId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_volunteer(volunteer)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
        _at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_pair(
        &self,
        _volunteer: &VolunteerId,
        _opportunity: &OpportunityId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_opportunity(
        &self,
        _opportunity: &OpportunityId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_volunteer(
        &self,
        _volunteer: &VolunteerId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (ApplicationService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = ApplicationService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(service: ApplicationService<MemoryRepository>) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
