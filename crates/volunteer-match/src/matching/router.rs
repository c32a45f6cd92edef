use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MatchingConfig;
use crate::domain::{OpportunityRecord, VolunteerProfile};

use super::{
    calculate_match_score, rank_opportunities, MatchLabel, MatchScoreResult, RankedOpportunity,
};

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub volunteer: VolunteerProfile,
    pub opportunity: OpportunityRecord,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub label: MatchLabel,
    #[serde(flatten)]
    pub result: MatchScoreResult,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub volunteer: VolunteerProfile,
    pub opportunities: Vec<OpportunityRecord>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Evaluation instant for deadlines; defaults to the current time.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub count: usize,
    pub opportunities: Vec<RankedOpportunity>,
}

/// Stateless scoring endpoints.
pub fn match_router(config: MatchingConfig) -> Router {
    Router::new()
        .route("/api/v1/matches/score", post(score_handler))
        .route("/api/v1/matches/rank", post(rank_handler))
        .with_state(config)
}

pub(crate) async fn score_handler(Json(request): Json<ScoreRequest>) -> Json<ScoreResponse> {
    let result = calculate_match_score(&request.volunteer, &request.opportunity);
    Json(ScoreResponse {
        label: result.label(),
        result,
    })
}

pub(crate) async fn rank_handler(
    State(config): State<MatchingConfig>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, (StatusCode, Json<serde_json::Value>)> {
    let limit = request.limit.unwrap_or(config.rank_limit);
    if limit == 0 {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "limit must be at least 1" })),
        ));
    }

    let now = request.as_of.unwrap_or_else(Utc::now);
    let opportunities = rank_opportunities(&request.volunteer, &request.opportunities, now, limit);
    Ok(Json(RankResponse {
        count: opportunities.len(),
        opportunities,
    }))
}
