//! Data models for Azkar

mod preferences;
mod reminder;

pub(crate) use preferences::truncate_to_minute;
pub use preferences::{AppIcon, Preferences, ThemeMode};
pub use reminder::{CalendarTrigger, ReminderRequest, ReminderSlot};
