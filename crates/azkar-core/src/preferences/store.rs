//! Preferences store implementation
//!
//! A single `Preferences` value shared through cloneable handles. Every
//! mutation goes through [`PreferencesStore::update`], which diffs the value
//! and broadcasts one [`PreferenceEvent`] per field that actually changed.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;

use crate::models::Preferences;

const EVENT_CAPACITY: usize = 64;

/// A single preferences field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    EnableNotifications,
    MorningNotificationTime,
    EveningNotificationTime,
    AppIcon,
    Theme,
    ArabicFont,
    TranslationFont,
    FontSize,
    EnableFunFeatures,
}

impl PreferenceField {
    /// Fields the reminder schedule is derived from
    pub const fn affects_reminders(self) -> bool {
        matches!(
            self,
            Self::EnableNotifications | Self::MorningNotificationTime | Self::EveningNotificationTime
        )
    }
}

/// Who made a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Loaded from storage, set by another screen, or any non-editor write
    External,
    /// Written back by the settings editor from user input
    Editor,
}

/// Change notification for a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceEvent {
    pub field: PreferenceField,
    pub origin: ChangeOrigin,
}

struct Inner {
    prefs: RwLock<Preferences>,
    events: broadcast::Sender<PreferenceEvent>,
}

/// Cloneable handle to the process-wide preferences
#[derive(Clone)]
pub struct PreferencesStore {
    inner: Arc<Inner>,
}

impl PreferencesStore {
    pub fn new(prefs: Preferences) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                prefs: RwLock::new(prefs),
                events,
            }),
        }
    }

    /// Copy of the current preferences
    pub fn snapshot(&self) -> Preferences {
        self.inner
            .prefs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to changes made after this call. There is no replay of the
    /// current value.
    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceEvent> {
        self.inner.events.subscribe()
    }

    /// Mutate the preferences and broadcast the fields that changed.
    ///
    /// Returns the changed fields. Writing a value equal to the current one
    /// emits nothing.
    pub fn update(
        &self,
        origin: ChangeOrigin,
        mutate: impl FnOnce(&mut Preferences),
    ) -> Vec<PreferenceField> {
        let changed = {
            let mut prefs = self
                .inner
                .prefs
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let before = prefs.clone();
            mutate(&mut prefs);
            changed_fields(&before, &prefs)
        };

        for field in &changed {
            self.notify(*field, origin);
        }
        if !changed.is_empty() {
            tracing::debug!(?changed, ?origin, "Preferences updated");
        }
        changed
    }

    /// Broadcast a change for `field` without modifying it. Used when a
    /// write must be reacted to even though the value stayed the same.
    pub fn notify(&self, field: PreferenceField, origin: ChangeOrigin) {
        // No receivers is fine: nothing is listening yet.
        let _ = self.inner.events.send(PreferenceEvent { field, origin });
    }
}

fn changed_fields(before: &Preferences, after: &Preferences) -> Vec<PreferenceField> {
    let mut changed = Vec::new();
    if before.enable_notifications != after.enable_notifications {
        changed.push(PreferenceField::EnableNotifications);
    }
    if before.morning_notification_time != after.morning_notification_time {
        changed.push(PreferenceField::MorningNotificationTime);
    }
    if before.evening_notification_time != after.evening_notification_time {
        changed.push(PreferenceField::EveningNotificationTime);
    }
    if before.app_icon != after.app_icon {
        changed.push(PreferenceField::AppIcon);
    }
    if before.theme != after.theme {
        changed.push(PreferenceField::Theme);
    }
    if before.arabic_font != after.arabic_font {
        changed.push(PreferenceField::ArabicFont);
    }
    if before.translation_font != after.translation_font {
        changed.push(PreferenceField::TranslationFont);
    }
    if before.font_size != after.font_size {
        changed.push(PreferenceField::FontSize);
    }
    if before.enable_fun_features != after.enable_fun_features {
        changed.push(PreferenceField::EnableFunFeatures);
    }
    changed
}
