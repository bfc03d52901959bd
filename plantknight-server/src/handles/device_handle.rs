use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use plantknight_api::models::*;

use crate::errors::request::required;
use crate::errors::{AccountError, ApiError};
use crate::models::{Account, Device};
use crate::repositories::{AccountRepository, DeviceRepository};

#[derive(Clone)]
pub struct DeviceState {
    pub account_repository: Arc<AccountRepository>,
    pub device_repository: Arc<DeviceRepository>,
}

pub fn device_router(device_state: DeviceState) -> Router {
    Router::new()
        .route("/api/add_plant", post(add_plant))
        .route("/api/remove_plant", post(remove_plant))
        .route("/api/plants", get(get_plants))
        .with_state(device_state)
}

impl DeviceState {
    async fn find_account(&self, username: &str) -> Result<Account, ApiError> {
        let account = self
            .account_repository
            .find_by_username(username)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        Ok(account)
    }
}

#[utoipa::path(
    post,
    path = "/api/add_plant",
    tag = "device",
    request_body = AddPlantRequest,
    responses(
        (status = 201, description = "Plant added, return the generated device id", body = AddPlantResponse),
        (status = 400, description = "Username, plant_name or species missing"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_plant(
    State(state): State<DeviceState>,
    body: Result<Json<AddPlantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddPlantResponse>), ApiError> {
    let Json(body) = body?;
    let username = required(&body.username, "username")?;
    let plant_name = required(&body.plant_name, "plant_name")?;
    let species = required(&body.species, "species")?;

    let account = state.find_account(username).await?;

    let mut device = Device {
        id: 0,
        account_id: account.id,
        device_id: String::new(),
        plant_name: plant_name.to_string(),
        species: species.to_string(),
        is_connected: false,
    };

    let mut tx = state.account_repository.get_pool().begin().await?;
    state
        .device_repository
        .create_with_generated_id(&mut device, Device::generate_id, &mut tx)
        .await?;
    tx.commit().await?;

    tracing::info!(username, device_id = %device.device_id, "plant added");

    Ok((
        StatusCode::CREATED,
        Json(AddPlantResponse {
            message: "Plant added successfully".to_string(),
            device_id: device.device_id,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/remove_plant",
    tag = "device",
    request_body = RemovePlantRequest,
    responses(
        (status = 200, description = "Plant removed, or was not registered to the user", body = RemovePlantResponse),
        (status = 400, description = "Username or device_id missing"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_plant(
    State(state): State<DeviceState>,
    body: Result<Json<RemovePlantRequest>, JsonRejection>,
) -> Result<Json<RemovePlantResponse>, ApiError> {
    let Json(body) = body?;
    let username = required(&body.username, "username")?;
    let device_id = required(&body.device_id, "device_id")?;

    let account = state.find_account(username).await?;

    let mut tx = state.account_repository.get_pool().begin().await?;
    let removed = state
        .device_repository
        .delete_by_account_id_and_device_id(account.id, device_id, &mut tx)
        .await?;
    tx.commit().await?;

    if removed == 0 {
        tracing::debug!(username, device_id, "remove_plant: device not in list");
    }

    Ok(Json(RemovePlantResponse {
        message: "Plant removed successfully".to_string(),
        id: device_id.to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/plants",
    tag = "device",
    params(
        ("username" = String, Query, description = "Owner of the devices")
    ),
    responses(
        (status = 200, description = "Devices of the user in the order they were added", body = Vec<DeviceResponse>),
        (status = 400, description = "Username missing"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_plants(
    State(state): State<DeviceState>,
    query: Result<Query<PlantsQuery>, QueryRejection>,
) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    let Query(query) = query?;
    let username = required(&query.username, "username")?;

    let account = state.find_account(username).await?;
    let devices = state.device_repository.find_by_account_id(account.id).await?;

    Ok(Json(devices.into_iter().map(DeviceResponse::from).collect()))
}
