use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::Account;

pub struct AccountRepository {
    storage: Arc<Storage>,
}

impl AccountRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl AccountRepository {
    pub async fn create(
        &self,
        item: &Account,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO accounts (username, password)
            VALUES ($1, $2)
            "#,
        )
        .bind(&item.username)
        .bind(&item.password)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Account>, Error> {
        let account: Option<Account> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(account)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, Error> {
        let account: Option<Account> =
            sqlx::query_as("SELECT * FROM accounts WHERE username = $1")
                .bind(username)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(account)
    }
}
