pub mod common;
pub mod completions;
pub mod notifications;
pub mod options;
pub mod prefs;
