use azkar_core::{AppIcon, ChangeOrigin, Preferences, ReminderSlot, ThemeMode};
use serde::Serialize;

use crate::cli::PrefsCommands;
use crate::commands::common::{format_preference_lines, format_schedule_lines, Session};
use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PreferencesView<'a> {
    #[serde(flatten)]
    prefs: &'a Preferences,
    morning_time_text: String,
    evening_time_text: String,
    locale: &'static str,
}

pub async fn run_prefs(command: PrefsCommands, config: &CliConfig) -> Result<(), CliError> {
    match command {
        PrefsCommands::Show { json } => run_show(json, config).await,
        PrefsCommands::Enable => run_set_enabled(true, config).await,
        PrefsCommands::Disable => run_set_enabled(false, config).await,
        PrefsCommands::Time { slot, time } => {
            run_set_time(slot.into(), &time.join(" "), config).await
        }
        PrefsCommands::Icon { icon } => run_set_icon(icon.into(), config).await,
        PrefsCommands::Theme { theme } => run_set_theme(theme.into(), config).await,
        PrefsCommands::Fun { state } => run_set_fun(state.is_on(), config).await,
    }
}

async fn run_show(as_json: bool, config: &CliConfig) -> Result<(), CliError> {
    let session = Session::open(config).await?;
    let prefs = session.preferences();
    let formatter = config.formatter();

    if as_json {
        let view = PreferencesView {
            prefs: &prefs,
            morning_time_text: formatter.format_short_time(prefs.morning_notification_time),
            evening_time_text: formatter.format_short_time(prefs.evening_notification_time),
            locale: config.locale.tag(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in format_preference_lines(&prefs, formatter) {
            println!("{line}");
        }
    }
    Ok(())
}

pub async fn set_enabled(enabled: bool, config: &CliConfig) -> Result<Session, CliError> {
    let mut session = Session::open(config).await?;
    let changed = session.store().update(ChangeOrigin::External, |prefs| {
        prefs.enable_notifications = enabled;
    });
    if changed.is_empty() {
        // Already in the requested state; make sure the schedule agrees.
        let prefs = session.preferences();
        session
            .settings()
            .scheduler()
            .on_preferences_changed(
                prefs.enable_notifications,
                prefs.morning_notification_time,
                prefs.evening_notification_time,
            )
            .await;
    }
    session.commit().await?;
    Ok(session)
}

async fn run_set_enabled(enabled: bool, config: &CliConfig) -> Result<(), CliError> {
    let session = set_enabled(enabled, config).await?;
    print_schedule(&session, config).await
}

/// Outcome of a time edit
pub struct TimeEdit {
    pub session: Session,
    pub applied: chrono::NaiveTime,
    pub used_default: bool,
}

pub async fn set_time(
    slot: ReminderSlot,
    text: &str,
    config: &CliConfig,
) -> Result<TimeEdit, CliError> {
    let mut session = Session::open(config).await?;
    let used_default = config.formatter().parse_short_time(text).is_none();
    let applied = session.sync().edit_time(slot, text);
    session.commit().await?;
    Ok(TimeEdit {
        session,
        applied,
        used_default,
    })
}

async fn run_set_time(slot: ReminderSlot, text: &str, config: &CliConfig) -> Result<(), CliError> {
    let edit = set_time(slot, text, config).await?;
    let formatter = config.formatter();
    if edit.used_default {
        eprintln!(
            "Could not read {text:?} as a time; using the default {slot} time {}",
            formatter.format_short_time(edit.applied)
        );
    }
    println!(
        "{slot} reminder: {}",
        formatter.format_short_time(edit.applied)
    );
    print_schedule(&edit.session, config).await
}

async fn run_set_icon(icon: AppIcon, config: &CliConfig) -> Result<(), CliError> {
    let mut session = Session::open(config).await?;
    if !session.settings().can_change_icon() {
        println!("This device cannot change its icon");
        return Ok(());
    }
    session
        .store()
        .update(ChangeOrigin::External, |prefs| prefs.app_icon = icon);
    session.commit().await?;
    println!("App icon: {icon}");
    Ok(())
}

async fn run_set_theme(theme: ThemeMode, config: &CliConfig) -> Result<(), CliError> {
    let mut session = Session::open(config).await?;
    session
        .store()
        .update(ChangeOrigin::External, |prefs| prefs.theme = theme);
    session.commit().await?;
    println!("Theme: {theme}");
    Ok(())
}

async fn run_set_fun(enabled: bool, config: &CliConfig) -> Result<(), CliError> {
    let mut session = Session::open(config).await?;
    session.store().update(ChangeOrigin::External, |prefs| {
        prefs.enable_fun_features = enabled;
    });
    session.commit().await?;
    println!("Fun features: {}", if enabled { "on" } else { "off" });
    Ok(())
}

async fn print_schedule(session: &Session, config: &CliConfig) -> Result<(), CliError> {
    let reminders = session.pending_reminders().await?;
    for line in format_schedule_lines(&reminders, config.formatter()) {
        println!("{line}");
    }
    Ok(())
}
