//! Pooled SQLite connection

use crate::config::Config;
use crate::infrastructure::error::StorageError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::ops::Deref;
use std::str::FromStr;

/// Process-owned pool, registered in the container with `di::existing_as_self`.
pub struct DatabaseConnection {
    connection: SqlitePool,
}

impl DatabaseConnection {
    pub fn new(pool: SqlitePool) -> DatabaseConnection {
        DatabaseConnection { connection: pool }
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?.create_if_missing(true))
}

/// Opens the pool eagerly so a bad connection string fails at startup.
pub async fn connect(config: &Config) -> Result<SqlitePool, StorageError> {
    let options = connect_options(&config.database_url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the `interactions` table if it is missing. Safe to run on every start.
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}
