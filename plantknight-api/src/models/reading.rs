use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Unit of the `temperature` field in a submitted reading.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Converts `value`, expressed in this unit, to degrees Fahrenheit.
    pub fn to_fahrenheit(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Fahrenheit => value,
        }
    }
}

/// Reading posted by a device.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReadingRequest {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub species: String,
    /// Air temperature, in `unit`.
    pub temperature: Option<f64>,
    /// Soil moisture percentage.
    pub moisture: Option<f64>,
    /// Light level in lumens.
    pub light_levels: Option<f64>,
    pub soil_ph: Option<f64>,
    /// Defaults to Celsius, the unit the sensor firmware reports.
    #[serde(default)]
    pub unit: TemperatureUnit,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingCreatedResponse {
    pub message: String,
    /// Identifier of the stored reading.
    pub id: i32,
}

/// Stored reading. Temperature is always in Fahrenheit.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingResponse {
    pub id: i32,
    pub device_id: String,
    pub species: String,
    pub temperature: f64,
    pub moisture: f64,
    pub light_levels: f64,
    pub soil_ph: Option<f64>,
    /// Server time at which the reading was accepted.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestReadingResponse {
    pub message: String,
    pub output: ReadingResponse,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReadingQuery {
    #[serde(default)]
    pub device_id: String,
}
