use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use plantknight_api::models::*;

use crate::errors::request::required;
use crate::errors::{AccountError, ApiError};
use crate::models::{Account, Device};
use crate::repositories::{AccountRepository, DeviceRepository};
use crate::services::AuthService;

#[derive(Clone)]
pub struct AccountState {
    pub auth_service: Arc<AuthService>,
    pub account_repository: Arc<AccountRepository>,
    pub device_repository: Arc<DeviceRepository>,
}

pub fn account_router(account_state: AccountState) -> Router {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .with_state(account_state)
}

// A concurrent registration can pass the existence checks and still hit the unique index.
fn unique_violation_as_conflict(error: sqlx::Error) -> ApiError {
    let conflict = match error.as_database_error() {
        Some(e) if e.is_unique_violation() && e.message().contains("devices.device_id") => {
            Some(AccountError::DeviceExists)
        }
        Some(e) if e.is_unique_violation() => Some(AccountError::UsernameExists),
        _ => None,
    };

    match conflict {
        Some(conflict) => conflict.into(),
        None => error.into(),
    }
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Username, password or device_id missing"),
        (status = 409, description = "Username or device already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    State(state): State<AccountState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(body) = body?;
    let username = required(&body.username, "username")?;
    required(&body.password, "password")?;
    let device_id = required(&body.device_id, "device_id")?;

    if state.account_repository.find_by_username(username).await?.is_some() {
        return Err(AccountError::UsernameExists.into());
    }

    if state.device_repository.find_by_device_id(device_id).await?.is_some() {
        return Err(AccountError::DeviceExists.into());
    }

    let hash_password = state
        .auth_service
        .hash(&body.password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let account = Account {
        id: 0,
        username: username.to_string(),
        password: hash_password,
    };

    let mut tx = state.account_repository.get_pool().begin().await?;

    let account_id = state
        .account_repository
        .create(&account, &mut tx)
        .await
        .map_err(unique_violation_as_conflict)?;

    let device = Device {
        id: 0,
        account_id,
        device_id: device_id.to_string(),
        plant_name: body.plant_name.unwrap_or_default(),
        species: body.species.unwrap_or_default(),
        is_connected: false,
    };

    state
        .device_repository
        .create(&device, &mut tx)
        .await
        .map_err(unique_violation_as_conflict)?;

    tx.commit().await?;

    tracing::info!(username, device_id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, return the account and its devices", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid username or password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(
    State(state): State<AccountState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = body?;
    let username = required(&body.username, "username")?;
    required(&body.password, "password")?;

    let account = state
        .account_repository
        .find_by_username(username)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

    let verified = state
        .auth_service
        .verify(&account, &body.password)
        .map_err(|e| anyhow!("Failed to verify password: {}", e))?;

    if !verified {
        return Err(AccountError::InvalidCredentials.into());
    }

    let devices = state.device_repository.find_by_account_id(account.id).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        account: AccountResponse {
            username: account.username,
            devices: devices.into_iter().map(DeviceResponse::from).collect(),
        },
    }))
}
