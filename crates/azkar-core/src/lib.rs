//! azkar-core - Core library for Azkar
//!
//! This crate contains the preferences store, the daily reminder scheduler,
//! the settings synchronisation adapter and the libSQL persistence used by
//! the Azkar clients.

pub mod db;
pub mod error;
pub mod format;
pub mod icon;
pub mod models;
pub mod notifications;
pub mod preferences;
pub mod settings_sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{AppIcon, Preferences, ReminderRequest, ReminderSlot, ThemeMode};
pub use preferences::{ChangeOrigin, PreferenceEvent, PreferenceField, PreferencesStore};
pub use settings_sync::SettingsSync;
