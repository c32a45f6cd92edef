use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{OpportunityId, VolunteerId};
use crate::error::AppError;

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, ApplicationView,
};
use super::repository::ApplicationRepository;
use super::service::ApplicationService;

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: ApplicationStatus,
}

/// Router builder exposing application intake and review endpoints.
pub fn application_router<R>(service: Arc<ApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            put(status_handler::<R>),
        )
        .route(
            "/api/v1/opportunities/:opportunity_id/applications",
            get(opportunity_applications_handler::<R>),
        )
        .route(
            "/api/v1/volunteers/:volunteer_id/applications",
            get(volunteer_applications_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Result<(StatusCode, Json<ApplicationView>), AppError>
where
    R: ApplicationRepository + 'static,
{
    let submitted = service.submit(submission)?;
    let status = if submitted.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(submitted.record.view())))
}

pub(crate) async fn application_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationView>, AppError>
where
    R: ApplicationRepository + 'static,
{
    let record = service.get(&ApplicationId(application_id))?;
    Ok(Json(record.view()))
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(application_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<ApplicationView>, AppError>
where
    R: ApplicationRepository + 'static,
{
    let record = service.update_status(&ApplicationId(application_id), update.status)?;
    Ok(Json(record.view()))
}

pub(crate) async fn opportunity_applications_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(opportunity_id): Path<String>,
) -> Result<Json<Value>, AppError>
where
    R: ApplicationRepository + 'static,
{
    let opportunity_id = OpportunityId(opportunity_id);
    let records = service.for_opportunity(&opportunity_id)?;
    Ok(Json(json!({
        "opportunity_id": opportunity_id,
        "count": records.len(),
        "applications": views(&records),
    })))
}

pub(crate) async fn volunteer_applications_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(volunteer_id): Path<String>,
) -> Result<Json<Value>, AppError>
where
    R: ApplicationRepository + 'static,
{
    let volunteer_id = VolunteerId(volunteer_id);
    let records = service.for_volunteer(&volunteer_id)?;
    Ok(Json(json!({
        "volunteer_id": volunteer_id,
        "applications": views(&records),
    })))
}

fn views(records: &[ApplicationRecord]) -> Vec<ApplicationView> {
    records.iter().map(ApplicationRecord::view).collect()
}
