//! Daily reminder model

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the two fixed daily reminder identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderSlot {
    Morning,
    Evening,
}

impl ReminderSlot {
    pub const ALL: [Self; 2] = [Self::Morning, Self::Evening];

    /// Identifier the reminder is registered under with the notification service
    pub const fn id(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
        }
    }

    /// Notification title shown for this slot
    pub const fn title(self) -> &'static str {
        match self {
            Self::Morning => "Утренние азкары 🌅",
            Self::Evening => "Вечерние азкары 🌄",
        }
    }

    /// Time used when no valid time has been configured
    pub fn default_time(self) -> NaiveTime {
        let hour = match self {
            Self::Morning => 8,
            Self::Evening => 20,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }

    /// All fixed identifiers, in slot order
    pub fn ids() -> Vec<String> {
        Self::ALL.iter().map(|slot| slot.id().to_string()).collect()
    }
}

impl fmt::Display for ReminderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ReminderSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown reminder slot: {s}")))
    }
}

/// Wall-clock trigger matching hour and minute of every day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTrigger {
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
}

impl CalendarTrigger {
    /// Daily repeating trigger at the hour and minute of `time`
    pub fn daily(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            repeats: true,
        }
    }

    pub fn time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }

    /// Whether the trigger fires during the minute containing `time`
    pub fn matches(self, time: NaiveTime) -> bool {
        self.hour == time.hour() && self.minute == time.minute()
    }

    /// Next moment strictly after `now` at which this trigger fires
    pub fn next_fire_after(self, now: NaiveDateTime) -> NaiveDateTime {
        let candidate = now.date().and_time(self.time());
        if candidate > now {
            candidate
        } else {
            candidate + Duration::days(1)
        }
    }
}

/// A reminder request as submitted to the notification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    /// Play the default notification sound
    pub sound: bool,
    pub trigger: CalendarTrigger,
}

impl ReminderRequest {
    /// Repeating daily reminder for `slot` at the hour and minute of `time`
    pub fn daily(slot: ReminderSlot, time: NaiveTime) -> Self {
        Self {
            id: slot.id().to_string(),
            title: slot.title().to_string(),
            body: None,
            sound: true,
            trigger: CalendarTrigger::daily(time),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn daily_request_uses_slot_identity() {
        let request = ReminderRequest::daily(ReminderSlot::Evening, at(19, 30));
        assert_eq!(request.id, "evening");
        assert_eq!(request.title, "Вечерние азкары 🌄");
        assert_eq!(
            request.trigger,
            CalendarTrigger {
                hour: 19,
                minute: 30,
                repeats: true
            }
        );
    }

    #[test]
    fn trigger_ignores_seconds() {
        let trigger = CalendarTrigger::daily(NaiveTime::from_hms_opt(7, 5, 59).unwrap());
        assert_eq!(trigger.time(), at(7, 5));
        assert!(trigger.matches(NaiveTime::from_hms_opt(7, 5, 12).unwrap()));
        assert!(!trigger.matches(at(7, 6)));
    }

    #[test]
    fn next_fire_rolls_over_to_tomorrow() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let trigger = CalendarTrigger::daily(at(8, 0));

        let before = day.and_time(at(6, 0));
        assert_eq!(trigger.next_fire_after(before), day.and_time(at(8, 0)));

        let exactly = day.and_time(at(8, 0));
        let tomorrow = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(trigger.next_fire_after(exactly), tomorrow.and_time(at(8, 0)));
    }

    #[test]
    fn slot_parses_from_id() {
        assert_eq!("Morning".parse::<ReminderSlot>().unwrap(), ReminderSlot::Morning);
        assert!("noon".parse::<ReminderSlot>().is_err());
        assert_eq!(ReminderSlot::ids(), vec!["morning", "evening"]);
    }
}
