use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Device;

const GENERATED_ID_ATTEMPTS: u32 = 3;

fn is_unique_violation(error: &Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|e| e.is_unique_violation())
}

pub struct DeviceRepository {
    storage: Arc<Storage>,
}

impl DeviceRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl DeviceRepository {
    pub async fn create(
        &self,
        item: &Device,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO devices (account_id, device_id, plant_name, species, is_connected)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.account_id)
        .bind(&item.device_id)
        .bind(&item.plant_name)
        .bind(&item.species)
        .bind(item.is_connected)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    /// Inserts `item` under an id drawn from `generate_id`, drawing again while the id is taken.
    /// The chosen id is written back into `item`.
    pub async fn create_with_generated_id(
        &self,
        item: &mut Device,
        mut generate_id: impl FnMut() -> String,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let mut attempt = 1;

        loop {
            item.device_id = generate_id();

            match self.create(item, transaction).await {
                Err(e) if attempt < GENERATED_ID_ATTEMPTS && is_unique_violation(&e) => {
                    tracing::debug!(device_id = %item.device_id, "generated device id taken");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    pub async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as("SELECT * FROM devices WHERE device_id = $1")
            .bind(device_id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(device)
    }

    // In the order the devices were added
    pub async fn find_by_account_id(&self, account_id: i32) -> Result<Vec<Device>, Error> {
        let devices: Vec<Device> =
            sqlx::query_as("SELECT * FROM devices WHERE account_id = $1 ORDER BY id")
                .bind(account_id)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(devices)
    }

    /// Flags the device that reported `device_id` as connected. Returns the number of rows touched,
    /// zero when no account owns that device yet.
    pub async fn mark_connected(
        &self,
        device_id: &str,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, Error> {
        let affected = sqlx::query("UPDATE devices SET is_connected = TRUE WHERE device_id = $1")
            .bind(device_id)
            .execute(&mut **transaction)
            .await?
            .rows_affected();

        Ok(affected)
    }

    pub async fn delete_by_account_id_and_device_id(
        &self,
        account_id: i32,
        device_id: &str,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, Error> {
        let affected = sqlx::query("DELETE FROM devices WHERE account_id = $1 AND device_id = $2")
            .bind(account_id)
            .bind(device_id)
            .execute(&mut **transaction)
            .await?
            .rows_affected();

        Ok(affected)
    }
}
