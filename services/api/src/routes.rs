use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;
use std::sync::Arc;
use volunteer_match::applications::{
    application_router, ApplicationRepository, ApplicationService,
};
use volunteer_match::config::MatchingConfig;
use volunteer_match::matching::match_router;

pub(crate) fn with_service_routes<R>(
    service: Arc<ApplicationService<R>>,
    matching: MatchingConfig,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
{
    application_router(service)
        .merge(match_router(matching))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryApplicationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let service = Arc::new(ApplicationService::new(Arc::new(
            InMemoryApplicationRepository::default(),
        )));
        with_service_routes(service, MatchingConfig { rank_limit: 1 })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    fn opportunity(id: &str, cause: &str) -> Value {
        json!({
            "id": id,
            "issuer_id": "ngo-1",
            "title": id,
            "skills": [{ "name": "Coding", "importance": "required" }],
            "cause": cause,
            "location": { "type": "remote" },
            "schedule": {
                "start_date": "2025-01-01T00:00:00Z",
                "end_date": "2025-01-03T00:00:00Z",
                "hours_required": 4
            }
        })
    }

    fn volunteer() -> Value {
        json!({
            "id": "vol-1",
            "skills": ["coding"],
            "causes": ["Environment"],
            "availability": { "hours_per_week": 2 },
            "location": { "city": "Pune", "state": "Maharashtra", "remote": false },
            "commitment": "One-time"
        })
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serializable")))
            .expect("request builds")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn score_endpoint_returns_breakdown_and_label() {
        let response = router()
            .oneshot(post(
                "/api/v1/matches/score",
                json!({
                    "volunteer": volunteer(),
                    "opportunity": opportunity("opp-1", "Environment")
                }),
            ))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // 40 skills + 10 availability + 15 remote + 10 cause + 10 one-time
        assert_eq!(body["total_score"], 85);
        assert_eq!(body["label"], "High");
        assert_eq!(body["breakdown"]["availability"], 10.0);
        let recommendations = body["recommendations"].as_array().expect("array");
        assert_eq!(recommendations.len(), 2);
    }

    #[tokio::test]
    async fn rank_endpoint_uses_configured_limit() {
        let response = router()
            .oneshot(post(
                "/api/v1/matches/rank",
                json!({
                    "volunteer": volunteer(),
                    "opportunities": [
                        opportunity("opp-health", "Health"),
                        opportunity("opp-env", "Environment")
                    ],
                    "as_of": "2024-12-01T00:00:00Z"
                }),
            ))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["opportunities"][0]["opportunity_id"], "opp-env");
    }

    #[tokio::test]
    async fn rank_endpoint_rejects_zero_limit() {
        let response = router()
            .oneshot(post(
                "/api/v1/matches/rank",
                json!({ "volunteer": volunteer(), "opportunities": [], "limit": 0 }),
            ))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
