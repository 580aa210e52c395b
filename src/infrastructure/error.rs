//! Storage failures

use sqlx::migrate::MigrateError;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("database unavailable: {0}")]
    Connection(String),
    #[error("duplicate interaction id: {0}")]
    DuplicateId(String),
    #[error("Failed to create or retrieve interaction.")]
    MissingAfterWrite,
    #[error("schema initialization failed: {0}")]
    Schema(#[from] MigrateError),
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StorageError::DuplicateId(db_error.message().to_owned())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StorageError::Connection(error.to_string()),
            _ => StorageError::Database(error.to_string()),
        }
    }
}
