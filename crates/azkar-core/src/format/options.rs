//! Candidate times for the reminder time pickers

use chrono::{Duration, NaiveTime};

const STEP_MINUTES: i64 = 30;

/// Evenly spaced 30-minute candidates covering `span_hours` from `start_hour:00`.
///
/// Returns `span_hours * 2 + 1` entries: both ends are included. Entries past
/// midnight wrap around to the start of the day.
pub fn time_options(start_hour: u32, span_hours: u32) -> Vec<NaiveTime> {
    let start = NaiveTime::from_hms_opt(start_hour % 24, 0, 0).unwrap_or_default();
    (0..=i64::from(span_hours) * 2)
        .map(|step| {
            start
                .overflowing_add_signed(Duration::minutes(step * STEP_MINUTES))
                .0
        })
        .collect()
}

/// Picker candidates for the morning reminder, 02:00 through 13:00.
pub fn morning_time_options() -> Vec<NaiveTime> {
    time_options(2, 11)
}

/// Picker candidates for the evening reminder, 14:00 through midnight.
pub fn evening_time_options() -> Vec<NaiveTime> {
    time_options(14, 10)
}
