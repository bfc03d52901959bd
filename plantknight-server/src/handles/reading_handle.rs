use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use plantknight_api::models::*;
use time::OffsetDateTime;

use crate::errors::request::{required, required_number};
use crate::errors::{ApiError, ReadingError};
use crate::models::Reading;
use crate::repositories::{DeviceRepository, ReadingRepository};

#[derive(Clone)]
pub struct ReadingState {
    pub reading_repository: Arc<ReadingRepository>,
    pub device_repository: Arc<DeviceRepository>,
}

pub fn reading_router(reading_state: ReadingState) -> Router {
    Router::new()
        .route("/api/catch_esp_data", post(catch_esp_data))
        .route("/api/get_plant_data", get(get_plant_data))
        .with_state(reading_state)
}

#[utoipa::path(
    post,
    path = "/api/catch_esp_data",
    tag = "reading",
    request_body = ReadingRequest,
    responses(
        (status = 201, description = "Reading stored, device flagged as connected", body = ReadingCreatedResponse),
        (status = 400, description = "device_id or a measurement missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn catch_esp_data(
    State(state): State<ReadingState>,
    body: Result<Json<ReadingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReadingCreatedResponse>), ApiError> {
    let Json(body) = body?;
    let device_id = required(&body.device_id, "device_id")?;
    let temperature = required_number(body.temperature, "temperature")?;
    let moisture = required_number(body.moisture, "moisture")?;
    let light_levels = required_number(body.light_levels, "light_levels")?;

    let mut species = body.species.trim().to_string();
    if species.is_empty() {
        if let Some(device) = state.device_repository.find_by_device_id(device_id).await? {
            species = device.species;
        }
    }

    let mut reading = Reading {
        id: 0,
        device_id: device_id.to_string(),
        species,
        temperature: body.unit.to_fahrenheit(temperature),
        moisture,
        light_levels,
        soil_ph: body.soil_ph,
        timestamp: OffsetDateTime::now_utc(),
    };

    let mut tx = state.reading_repository.get_pool().begin().await?;

    reading.id = state.reading_repository.create(&reading, &mut tx).await?;
    let flagged = state
        .device_repository
        .mark_connected(&reading.device_id, &mut tx)
        .await?;

    tx.commit().await?;

    if flagged == 0 {
        tracing::debug!(device_id, "reading from unregistered device");
    }

    tracing::info!(device_id, id = reading.id, "reading stored");

    Ok((
        StatusCode::CREATED,
        Json(ReadingCreatedResponse {
            message: "Data inserted successfully".to_string(),
            id: reading.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/get_plant_data",
    tag = "reading",
    params(
        ("device_id" = String, Query, description = "Device whose latest reading is returned")
    ),
    responses(
        (status = 200, description = "Most recent reading of the device", body = LatestReadingResponse),
        (status = 400, description = "device_id missing"),
        (status = 404, description = "No data found for the given device_id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_plant_data(
    State(state): State<ReadingState>,
    query: Result<Query<ReadingQuery>, QueryRejection>,
) -> Result<Json<LatestReadingResponse>, ApiError> {
    let Query(query) = query?;
    let device_id = required(&query.device_id, "device_id")?;

    let reading = state
        .reading_repository
        .find_most_recent(device_id)
        .await?
        .ok_or(ReadingError::ReadingNotFound)?;

    Ok(Json(LatestReadingResponse {
        message: "Data retrieved successfully".to_string(),
        output: reading.into(),
    }))
}
