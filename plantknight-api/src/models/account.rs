use serde::{Deserialize, Serialize};

use super::DeviceResponse;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Identifier of the first device, as printed on the hardware.
    #[serde(default)]
    pub device_id: String,
    /// Display name of the first plant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,
    /// Species of the first plant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub username: String,
    /// Devices in the order they were added.
    pub devices: Vec<DeviceResponse>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub account: AccountResponse,
}
