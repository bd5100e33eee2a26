//! Error types for azkar-core

use thiserror::Error;

/// Result type alias using azkar-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in azkar-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Notification service rejected a request
    #[error("Notification error: {0}")]
    Notification(String),

    /// Platform refused to switch the app icon
    #[error("Icon switch error: {0}")]
    IconSwitch(String),
}
