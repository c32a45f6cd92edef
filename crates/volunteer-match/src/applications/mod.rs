//! Application intake: scoring a volunteer against an opportunity at submission
//! time and tracking the resulting record through review.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, ApplicationView,
};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError, Submitted};
