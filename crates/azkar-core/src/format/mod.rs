//! Locale-aware short time formatting and picker options

mod options;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::truncate_to_minute;

pub use options::{evening_time_options, morning_time_options, time_options};

/// Locales with known short time and date conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeLocale {
    /// 12-hour clock, month first
    #[default]
    EnUs,
    /// 24-hour clock, day first
    EnGb,
    /// 24-hour clock, dotted dates
    Ru,
}

impl TimeLocale {
    pub const ALL: [Self; 3] = [Self::EnUs, Self::EnGb, Self::Ru];

    /// Parse a locale tag such as `en-US`, `en_GB.UTF-8` or `ru`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or(tag);
        let tag = tag.replace('_', "-").to_ascii_lowercase();

        match tag.as_str() {
            "en" | "en-us" | "c" | "posix" => Some(Self::EnUs),
            "en-gb" => Some(Self::EnGb),
            _ if tag == "ru" || tag.starts_with("ru-") => Some(Self::Ru),
            _ => None,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::Ru => "ru-RU",
        }
    }

    const fn short_time_pattern(self) -> &'static str {
        match self {
            Self::EnUs => "%-I:%M %p",
            Self::EnGb | Self::Ru => "%H:%M",
        }
    }

    const fn accepted_time_patterns(self) -> &'static [&'static str] {
        match self {
            Self::EnUs => &["%I:%M %p", "%I:%M%p"],
            Self::EnGb | Self::Ru => &["%H:%M"],
        }
    }

    const fn short_datetime_pattern(self) -> &'static str {
        match self {
            Self::EnUs => "%-m/%-d/%y, %-I:%M:%S %p",
            Self::EnGb => "%d/%m/%Y, %H:%M:%S",
            Self::Ru => "%d.%m.%Y, %H:%M:%S",
        }
    }
}

/// Short time formatter bound to a locale.
///
/// Formatting and parsing use the same conventions, so a formatted time
/// always parses back to the same hour and minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFormatter {
    locale: TimeLocale,
}

impl TimeFormatter {
    pub const fn new(locale: TimeLocale) -> Self {
        Self { locale }
    }

    pub const fn locale(&self) -> TimeLocale {
        self.locale
    }

    pub fn format_short_time(&self, time: NaiveTime) -> String {
        time.format(self.locale.short_time_pattern()).to_string()
    }

    /// Parse a short time string. Seconds are never part of the result.
    pub fn parse_short_time(&self, text: &str) -> Option<NaiveTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.locale
            .accepted_time_patterns()
            .iter()
            .find_map(|pattern| NaiveTime::parse_from_str(text, pattern).ok())
            .map(truncate_to_minute)
    }

    /// Short date with a medium (seconds) time
    pub fn format_short_datetime(&self, value: NaiveDateTime) -> String {
        value
            .format(self.locale.short_datetime_pattern())
            .to_string()
    }

    pub fn format_options(&self, times: &[NaiveTime]) -> Vec<String> {
        times
            .iter()
            .map(|time| self.format_short_time(*time))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn formats_short_time_per_locale() {
        let time = at(14, 5);
        assert_eq!(TimeFormatter::new(TimeLocale::EnUs).format_short_time(time), "2:05 PM");
        assert_eq!(TimeFormatter::new(TimeLocale::EnGb).format_short_time(time), "14:05");
        assert_eq!(TimeFormatter::new(TimeLocale::Ru).format_short_time(time), "14:05");
    }

    #[test]
    fn format_then_parse_keeps_hour_and_minute() {
        for locale in TimeLocale::ALL {
            let formatter = TimeFormatter::new(locale);
            for hour in 0..24 {
                for minute in [0, 1, 29, 30, 59] {
                    let time = NaiveTime::from_hms_opt(hour, minute, 42).unwrap();
                    let parsed = formatter
                        .parse_short_time(&formatter.format_short_time(time))
                        .unwrap();
                    assert_eq!((parsed.hour(), parsed.minute()), (hour, minute));
                    assert_eq!(parsed.second(), 0);
                }
            }
        }
    }

    #[test]
    fn midnight_and_noon_in_twelve_hour_clock() {
        let formatter = TimeFormatter::new(TimeLocale::EnUs);
        assert_eq!(formatter.format_short_time(at(0, 0)), "12:00 AM");
        assert_eq!(formatter.format_short_time(at(12, 0)), "12:00 PM");
        assert_eq!(formatter.parse_short_time("12:00 am"), Some(at(0, 0)));
        assert_eq!(formatter.parse_short_time(" 7:15PM "), Some(at(19, 15)));
    }

    #[test]
    fn rejects_invalid_text() {
        let formatter = TimeFormatter::new(TimeLocale::Ru);
        assert_eq!(formatter.parse_short_time(""), None);
        assert_eq!(formatter.parse_short_time("утро"), None);
        assert_eq!(formatter.parse_short_time("25:00"), None);
        assert_eq!(formatter.parse_short_time("7:15 PM"), None);
    }

    #[test]
    fn formats_short_datetime() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(6, 7, 8)
            .unwrap();
        assert_eq!(
            TimeFormatter::new(TimeLocale::EnUs).format_short_datetime(value),
            "3/9/24, 6:07:08 AM"
        );
        assert_eq!(
            TimeFormatter::new(TimeLocale::Ru).format_short_datetime(value),
            "09.03.2024, 06:07:08"
        );
    }

    #[test]
    fn locale_tags() {
        assert_eq!(TimeLocale::from_tag("en_US.UTF-8"), Some(TimeLocale::EnUs));
        assert_eq!(TimeLocale::from_tag("en-GB"), Some(TimeLocale::EnGb));
        assert_eq!(TimeLocale::from_tag("ru_RU.UTF-8"), Some(TimeLocale::Ru));
        assert_eq!(TimeLocale::from_tag("ru"), Some(TimeLocale::Ru));
        assert_eq!(TimeLocale::from_tag("ar_SA"), None);
    }
}
