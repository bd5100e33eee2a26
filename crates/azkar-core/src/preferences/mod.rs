//! Shared preferences store with change notifications

mod store;

pub use store::{ChangeOrigin, PreferenceEvent, PreferenceField, PreferencesStore};
