use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceResponse {
    /// Device identifier, eight lowercase hex characters when generated.
    pub device_id: String,
    /// Display name chosen by the owner.
    pub plant_name: String,
    /// Plant species.
    pub species: String,
    /// Whether the device has submitted at least one reading.
    pub is_connected: bool,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AddPlantRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub plant_name: String,
    #[serde(default)]
    pub species: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPlantResponse {
    pub message: String,
    /// Generated device identifier.
    pub device_id: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RemovePlantRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub device_id: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovePlantResponse {
    pub message: String,
    /// Identifier of the removed device.
    pub id: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PlantsQuery {
    #[serde(default)]
    pub username: String,
}
