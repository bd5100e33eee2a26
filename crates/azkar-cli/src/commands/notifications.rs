use azkar_core::format::TimeFormatter;
use azkar_core::notifications::{fetch_scheduled, NotificationRow, NotificationsList};
use chrono::Local;

use crate::cli::NotificationCommands;
use crate::commands::common::Session;
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_notifications(
    command: NotificationCommands,
    config: &CliConfig,
) -> Result<(), CliError> {
    match command {
        NotificationCommands::List { json } => run_list(json, config).await,
        NotificationCommands::Clear => run_clear(config).await,
        NotificationCommands::Due => run_due(config).await,
    }
}

pub async fn load_list(session: &Session, formatter: TimeFormatter) -> NotificationsList {
    let center = session.center();
    NotificationsList::load(|| fetch_scheduled(center), formatter).await
}

async fn run_list(as_json: bool, config: &CliConfig) -> Result<(), CliError> {
    let session = Session::open(config).await?;
    let list = load_list(&session, config.formatter()).await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(list.rows())?);
    } else {
        for line in format_notification_lines(list.rows()) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_clear(config: &CliConfig) -> Result<(), CliError> {
    let session = Session::open(config).await?;
    let mut list = load_list(&session, config.formatter()).await;
    let count = list.len();
    list.clear_all(session.center()).await;
    println!("Cleared {count} notifications");
    Ok(())
}

async fn run_due(config: &CliConfig) -> Result<(), CliError> {
    let session = Session::open(config).await?;
    let due = session
        .center()
        .deliver_due(Local::now().naive_local())
        .await?;

    if due.is_empty() {
        println!("No reminders due");
    }
    for reminder in due {
        println!("{}", reminder.title);
    }
    Ok(())
}

pub fn format_notification_lines(rows: &[NotificationRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No scheduled notifications".to_string()];
    }

    let mut lines = vec![format!("Notifications: {}", rows.len())];
    for row in rows {
        lines.push(format!("Notification #{}  {}", row.row + 1, row.date));
        lines.push(format!("  {}", row.title));
        if let Some(body) = &row.body {
            lines.push(format!("  {body}"));
        }
    }
    lines
}
