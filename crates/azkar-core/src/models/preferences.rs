//! User preferences model

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ReminderSlot;

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown theme: {s}")))
    }
}

/// Home screen icon variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppIcon {
    /// Primary bundle icon
    #[default]
    Gold,
    Ink,
    Light,
    Dark,
}

impl AppIcon {
    pub const ALL: [Self; 4] = [Self::Gold, Self::Ink, Self::Light, Self::Dark];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Ink => "ink",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Identifier handed to the platform's alternate icon API.
    ///
    /// `None` resets the app to its primary icon.
    pub const fn icon_name(self) -> Option<&'static str> {
        match self {
            Self::Gold => None,
            Self::Ink => Some("AppIconInk"),
            Self::Light => Some("AppIconLight"),
            Self::Dark => Some("AppIconDark"),
        }
    }
}

impl fmt::Display for AppIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppIcon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown app icon: {s}")))
    }
}

/// User preferences shared by the settings screen and the reminder scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the daily reminders are scheduled at all
    pub enable_notifications: bool,
    /// Time of day for the morning reminder (date is irrelevant)
    pub morning_notification_time: NaiveTime,
    /// Time of day for the evening reminder
    pub evening_notification_time: NaiveTime,
    /// Selected home screen icon
    pub app_icon: AppIcon,
    /// Theme mode
    pub theme: ThemeMode,
    /// Font family for Arabic text
    pub arabic_font: String,
    /// Font family for translations and transliterations
    pub translation_font: String,
    /// Base font size in points
    pub font_size: u32,
    /// Seasonal decorations and other playful touches
    pub enable_fun_features: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enable_notifications: true,
            morning_notification_time: ReminderSlot::Morning.default_time(),
            evening_notification_time: ReminderSlot::Evening.default_time(),
            app_icon: AppIcon::default(),
            theme: ThemeMode::default(),
            arabic_font: "KFGQPC Uthmanic Script HAFS".to_string(),
            translation_font: "system".to_string(),
            font_size: 17,
            enable_fun_features: false,
        }
    }
}

impl Preferences {
    /// Configured time for a reminder slot
    pub const fn reminder_time(&self, slot: ReminderSlot) -> NaiveTime {
        match slot {
            ReminderSlot::Morning => self.morning_notification_time,
            ReminderSlot::Evening => self.evening_notification_time,
        }
    }

    /// Set a reminder time, keeping only hour and minute.
    pub fn set_reminder_time(&mut self, slot: ReminderSlot, time: NaiveTime) {
        let time = truncate_to_minute(time);
        match slot {
            ReminderSlot::Morning => self.morning_notification_time = time,
            ReminderSlot::Evening => self.evening_notification_time = time,
        }
    }
}

/// Drop seconds and sub-second precision from a time of day.
pub(crate) fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
