use azkar_core::ReminderSlot;

use crate::commands::common::Session;
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_options(slot: ReminderSlot, config: &CliConfig) -> Result<(), CliError> {
    let session = Session::open(config).await?;
    let sync = session.settings();
    let options = match slot {
        ReminderSlot::Morning => sync.morning_options(),
        ReminderSlot::Evening => sync.evening_options(),
    };

    for line in mark_current(&options, sync.time_text(slot)) {
        println!("{line}");
    }
    Ok(())
}

/// Prefix each option, marking the one equal to `current` with `*`.
pub fn mark_current(options: &[String], current: &str) -> Vec<String> {
    options
        .iter()
        .map(|option| {
            let marker = if option == current { '*' } else { ' ' };
            format!("{marker} {option}")
        })
        .collect()
}
