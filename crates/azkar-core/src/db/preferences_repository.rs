//! Preferences repository implementation

use chrono::NaiveTime;
use libsql::Connection;

use crate::error::Result;
use crate::models::Preferences;
use crate::util::parse_flag;

const TIME_FORMAT: &str = "%H:%M";

/// Trait for preferences storage operations (async)
#[allow(async_fn_in_trait)]
pub trait PreferencesRepository {
    /// Load preferences; fields without a stored value keep their defaults
    async fn load(&self) -> Result<Preferences>;

    /// Save all preferences
    async fn save(&self, prefs: &Preferences) -> Result<()>;
}

/// libSQL implementation of `PreferencesRepository`
pub struct LibSqlPreferencesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlPreferencesRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl PreferencesRepository for LibSqlPreferencesRepository<'_> {
    async fn load(&self) -> Result<Preferences> {
        let mut prefs = Preferences::default();

        // Missing or unreadable values are not errors: the default stays.
        if let Some(value) = self.get_setting("enable_notifications").await? {
            prefs.enable_notifications = parse_flag(&value);
        }

        if let Some(value) = self.get_setting("morning_notification_time").await? {
            if let Ok(time) = NaiveTime::parse_from_str(&value, TIME_FORMAT) {
                prefs.morning_notification_time = time;
            }
        }

        if let Some(value) = self.get_setting("evening_notification_time").await? {
            if let Ok(time) = NaiveTime::parse_from_str(&value, TIME_FORMAT) {
                prefs.evening_notification_time = time;
            }
        }

        if let Some(value) = self.get_setting("app_icon").await? {
            prefs.app_icon = value.parse().unwrap_or_default();
        }

        if let Some(value) = self.get_setting("theme").await? {
            prefs.theme = value.parse().unwrap_or_default();
        }

        if let Some(value) = self.get_setting("arabic_font").await? {
            prefs.arabic_font = value;
        }

        if let Some(value) = self.get_setting("translation_font").await? {
            prefs.translation_font = value;
        }

        if let Some(value) = self.get_setting("font_size").await? {
            if let Ok(size) = value.parse() {
                prefs.font_size = size;
            }
        }

        if let Some(value) = self.get_setting("enable_fun_features").await? {
            prefs.enable_fun_features = parse_flag(&value);
        }

        Ok(prefs)
    }

    async fn save(&self, prefs: &Preferences) -> Result<()> {
        self.set_setting("enable_notifications", bool_str(prefs.enable_notifications))
            .await?;
        self.set_setting(
            "morning_notification_time",
            &prefs.morning_notification_time.format(TIME_FORMAT).to_string(),
        )
        .await?;
        self.set_setting(
            "evening_notification_time",
            &prefs.evening_notification_time.format(TIME_FORMAT).to_string(),
        )
        .await?;
        self.set_setting("app_icon", prefs.app_icon.as_str()).await?;
        self.set_setting("theme", prefs.theme.as_str()).await?;
        self.set_setting("arabic_font", &prefs.arabic_font).await?;
        self.set_setting("translation_font", &prefs.translation_font)
            .await?;
        self.set_setting("font_size", &prefs.font_size.to_string())
            .await?;
        self.set_setting("enable_fun_features", bool_str(prefs.enable_fun_features))
            .await?;
        Ok(())
    }
}

impl LibSqlPreferencesRepository<'_> {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT value FROM settings WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)",
                [key, value],
            )
            .await?;
        Ok(())
    }
}

const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
