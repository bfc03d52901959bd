use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use plantknight_api::models::*;

use crate::errors::request::required;
use crate::errors::{ApiError, ReadingError};
use crate::repositories::ReadingRepository;
use crate::services::RecommendationService;

#[derive(Clone)]
pub struct RecommendationState {
    pub reading_repository: Arc<ReadingRepository>,
    pub recommendation_service: Arc<RecommendationService>,
}

pub fn recommendation_router(recommendation_state: RecommendationState) -> Router {
    Router::new()
        .route("/api/call_llm", post(call_llm))
        .with_state(recommendation_state)
}

#[utoipa::path(
    post,
    path = "/api/call_llm",
    tag = "recommendation",
    request_body = RecommendRequest,
    responses(
        (status = 200, description = "Scores and advice for the latest reading of the device", body = RecommendationResponse),
        (status = 400, description = "device_id missing"),
        (status = 404, description = "No data found for the given device_id"),
        (status = 500, description = "Language model unreachable"),
        (status = 502, description = "Language model answer could not be used")
    )
)]
pub async fn call_llm(
    State(state): State<RecommendationState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let Json(body) = body?;
    let device_id = required(&body.device_id, "device_id")?;

    let reading = state
        .reading_repository
        .find_most_recent(device_id)
        .await?
        .ok_or(ReadingError::ReadingNotFound)?;

    let recommendation = state.recommendation_service.recommend(&reading).await?;

    Ok(Json(RecommendationResponse {
        message: "Recommendation generated successfully".to_string(),
        output: recommendation,
    }))
}
