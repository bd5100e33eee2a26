//! Database layer for Azkar

mod connection;
mod migrations;
mod preferences_repository;

pub use connection::Database;
pub use preferences_repository::{LibSqlPreferencesRepository, PreferencesRepository};
