use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string
    pub password: String,
}

#[derive(Clone)]
pub struct AccountTable;

impl Table for AccountTable {
    fn name(&self) -> &'static str {
        "accounts"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS accounts;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
