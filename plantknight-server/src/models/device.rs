use plantknight_api::models::DeviceResponse;
use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: i32,
    pub account_id: i32,
    pub device_id: String,
    pub plant_name: String,
    pub species: String,
    pub is_connected: bool,
}

impl Device {
    /// Random identifier of eight lowercase hex characters.
    pub fn generate_id() -> String {
        let value: u32 = rand::random();
        format!("{value:08x}")
    }
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        DeviceResponse {
            device_id: device.device_id,
            plant_name: device.plant_name,
            species: device.species,
            is_connected: device.is_connected,
        }
    }
}

#[derive(Clone)]
pub struct DeviceTable;

impl Table for DeviceTable {
    fn name(&self) -> &'static str {
        "devices"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id INTEGER NOT NULL,
                device_id TEXT NOT NULL UNIQUE,
                plant_name TEXT NOT NULL,
                species TEXT NOT NULL,
                is_connected BOOLEAN NOT NULL DEFAULT FALSE,
                FOREIGN KEY (account_id) REFERENCES accounts (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS devices;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["accounts"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_eight_hex_chars() {
        let id = Device::generate_id();

        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
