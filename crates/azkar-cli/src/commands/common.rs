use azkar_core::db::{Database, LibSqlPreferencesRepository, PreferencesRepository};
use azkar_core::format::TimeFormatter;
use azkar_core::icon::IconSwitcher;
use azkar_core::notifications::{LibSqlNotificationCenter, NotificationCenter, ReminderScheduler};
use azkar_core::{Preferences, PreferencesStore, ReminderRequest, SettingsSync};

use crate::config::CliConfig;
use crate::error::CliError;

/// Terminal stand-in for the platform icon API: the choice is only reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalIconSwitcher;

impl IconSwitcher for TerminalIconSwitcher {
    async fn set_alternate_icon(&self, name: Option<&str>) -> azkar_core::Result<()> {
        tracing::info!("App icon set to {}", name.unwrap_or("primary"));
        Ok(())
    }
}

pub type CliSettingsSync = SettingsSync<LibSqlNotificationCenter, TerminalIconSwitcher>;

/// Preferences loaded from disk, bound to the reminder schedule.
///
/// Edits go through [`Session::sync`]; [`Session::commit`] lets the adapter
/// react to them and persists the result.
pub struct Session {
    db: Database,
    sync: CliSettingsSync,
}

impl Session {
    pub async fn open(config: &CliConfig) -> Result<Self, CliError> {
        let db = Database::open(&config.db_path).await?;
        let prefs = LibSqlPreferencesRepository::new(db.connection())
            .load()
            .await?;
        let center = LibSqlNotificationCenter::new(db.connection().clone());
        let sync = SettingsSync::new(
            PreferencesStore::new(prefs),
            config.formatter(),
            ReminderScheduler::new(center),
            TerminalIconSwitcher,
        );
        Ok(Self { db, sync })
    }

    pub const fn settings(&self) -> &CliSettingsSync {
        &self.sync
    }

    pub fn sync(&mut self) -> &mut CliSettingsSync {
        &mut self.sync
    }

    pub fn store(&self) -> &PreferencesStore {
        self.sync.store()
    }

    pub fn center(&self) -> &LibSqlNotificationCenter {
        self.sync.scheduler().center()
    }

    pub fn preferences(&self) -> Preferences {
        self.sync.store().snapshot()
    }

    /// Apply pending reactions, then save the preferences.
    pub async fn commit(&mut self) -> Result<Preferences, CliError> {
        let handled = self.sync.pump().await;
        tracing::debug!("Handled {handled} preference changes");

        let prefs = self.preferences();
        LibSqlPreferencesRepository::new(self.db.connection())
            .save(&prefs)
            .await?;
        Ok(prefs)
    }

    pub async fn pending_reminders(&self) -> Result<Vec<ReminderRequest>, CliError> {
        Ok(self.center().pending().await?)
    }
}

pub fn format_preference_lines(prefs: &Preferences, formatter: TimeFormatter) -> Vec<String> {
    vec![
        format!("Notifications: {}", on_off(prefs.enable_notifications)),
        format!(
            "Morning reminder: {}",
            formatter.format_short_time(prefs.morning_notification_time)
        ),
        format!(
            "Evening reminder: {}",
            formatter.format_short_time(prefs.evening_notification_time)
        ),
        format!("App icon: {}", prefs.app_icon),
        format!("Theme: {}", prefs.theme),
        format!("Arabic font: {}", prefs.arabic_font),
        format!("Translation font: {}", prefs.translation_font),
        format!("Font size: {}", prefs.font_size),
        format!("Fun features: {}", on_off(prefs.enable_fun_features)),
    ]
}

pub fn format_schedule_lines(reminders: &[ReminderRequest], formatter: TimeFormatter) -> Vec<String> {
    if reminders.is_empty() {
        return vec!["No reminders scheduled".to_string()];
    }
    reminders
        .iter()
        .map(|reminder| {
            format!(
                "{:<8} {}  {}",
                reminder.id,
                formatter.format_short_time(reminder.trigger.time()),
                reminder.title
            )
        })
        .collect()
}

const fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
