use std::path::Path;
use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Error, SqlitePool};

use crate::configs::schema::SchemaManager;
use crate::configs::settings::Database;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database, schema_manager: SchemaManager) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&database.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1) // in memory db is dropped with its last connection
            .max_connections(10)
            .connect_with(options)
            .await?;

        Self::prepare_schema(&pool, &schema_manager, &database).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn prepare_schema(
        pool: &SqlitePool,
        schema: &SchemaManager,
        database: &Database,
    ) -> Result<(), Error> {
        if database.clean_start {
            sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
                .execute(pool)
                .await?;

            sqlx::raw_sql(&schema.dispose_schema().join("\n"))
                .execute(pool)
                .await?;

            tracing::warn!("clean start: dropped accounts, devices and readings");
        }

        // Idempotent, every statement is `IF NOT EXISTS`.
        sqlx::raw_sql(&schema.create_schema().join("\n"))
            .execute(pool)
            .await?;

        if let Some(migration_path) = &database.migration_path {
            let migrator = Migrator::new(Path::new(migration_path)).await?;
            migrator.run(pool).await?;

            tracing::info!("database migration from {migration_path} applied");
        }

        Ok(())
    }
}
