use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::Reading;

pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl ReadingRepository {
    pub async fn create(
        &self,
        item: &Reading,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO readings (device_id, species, temperature, moisture, light_levels, soil_ph, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&item.device_id)
        .bind(&item.species)
        .bind(item.temperature)
        .bind(item.moisture)
        .bind(item.light_levels)
        .bind(item.soil_ph)
        .bind(item.timestamp)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reading>, Error> {
        let reading: Option<Reading> = sqlx::query_as("SELECT * FROM readings WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(reading)
    }

    // Timestamps are stored as text with a trimmed fraction, so they are compared as instants.
    // Ties resolve to the later insert.
    pub async fn find_most_recent(&self, device_id: &str) -> Result<Option<Reading>, Error> {
        let reading: Option<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            WHERE device_id = $1
            ORDER BY julianday(timestamp) DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(device_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(reading)
    }
}
