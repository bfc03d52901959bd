use plantknight_api::models::ReadingResponse;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i32,
    pub device_id: String,
    pub species: String,
    /// Temperature in Fahrenheit
    pub temperature: f64,
    /// Soil moisture %
    pub moisture: f64,
    /// Light in lumens
    pub light_levels: f64,
    pub soil_ph: Option<f64>,
    /// Server time of insertion
    pub timestamp: OffsetDateTime,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        ReadingResponse {
            id: reading.id,
            device_id: reading.device_id,
            species: reading.species,
            temperature: reading.temperature,
            moisture: reading.moisture,
            light_levels: reading.light_levels,
            soil_ph: reading.soil_ph,
            timestamp: reading.timestamp,
        }
    }
}

#[derive(Clone)]
pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "readings"
    }

    // Readings are not tied to a registered device, a sensor may report before it is claimed.
    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id TEXT NOT NULL CHECK (device_id <> ''),
                species TEXT NOT NULL,
                temperature REAL NOT NULL,
                moisture REAL NOT NULL,
                light_levels REAL NOT NULL,
                soil_ph REAL,
                timestamp TIMESTAMP NOT NULL
            );
            CREATE INDEX IF NOT EXISTS readings_device_time ON readings (device_id, timestamp);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS readings;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
