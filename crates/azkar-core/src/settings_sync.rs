//! Settings synchronisation adapter
//!
//! Binds the settings screen to the preferences store:
//!
//! - store → editor: reminder times are published as locale-formatted strings
//! - editor → store: edited strings are parsed back, falling back to the slot
//!   default when the text is not a valid time
//! - store → platform: reminder fields reschedule the daily reminders, the
//!   icon preference switches the home screen icon
//!
//! Writes made by the editor carry [`ChangeOrigin::Editor`], which keeps them
//! from being echoed back into the edited strings.

use chrono::NaiveTime;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

use crate::format::{evening_time_options, morning_time_options, TimeFormatter};
use crate::icon::IconSwitcher;
use crate::models::ReminderSlot;
use crate::notifications::{NotificationCenter, ReminderScheduler};
use crate::preferences::{ChangeOrigin, PreferenceEvent, PreferenceField, PreferencesStore};

pub struct SettingsSync<N, I> {
    store: PreferencesStore,
    events: broadcast::Receiver<PreferenceEvent>,
    formatter: TimeFormatter,
    scheduler: ReminderScheduler<N>,
    icons: I,
    morning_time: String,
    evening_time: String,
}

impl<N: NotificationCenter, I: IconSwitcher> SettingsSync<N, I> {
    /// Bind to `store`. Only changes made after this call are reacted to;
    /// construction itself never writes preferences or reschedules.
    pub fn new(
        store: PreferencesStore,
        formatter: TimeFormatter,
        scheduler: ReminderScheduler<N>,
        icons: I,
    ) -> Self {
        let events = store.subscribe();
        let prefs = store.snapshot();
        Self {
            morning_time: formatter.format_short_time(prefs.morning_notification_time),
            evening_time: formatter.format_short_time(prefs.evening_notification_time),
            store,
            events,
            formatter,
            scheduler,
            icons,
        }
    }

    pub fn store(&self) -> &PreferencesStore {
        &self.store
    }

    pub fn scheduler(&self) -> &ReminderScheduler<N> {
        &self.scheduler
    }

    pub const fn formatter(&self) -> TimeFormatter {
        self.formatter
    }

    pub fn morning_time(&self) -> &str {
        &self.morning_time
    }

    pub fn evening_time(&self) -> &str {
        &self.evening_time
    }

    /// Current editor text for a slot
    pub fn time_text(&self, slot: ReminderSlot) -> &str {
        match slot {
            ReminderSlot::Morning => &self.morning_time,
            ReminderSlot::Evening => &self.evening_time,
        }
    }

    pub fn can_change_icon(&self) -> bool {
        self.icons.supports_alternate_icons()
    }

    pub fn morning_options(&self) -> Vec<String> {
        self.formatter.format_options(&morning_time_options())
    }

    pub fn evening_options(&self) -> Vec<String> {
        self.formatter.format_options(&evening_time_options())
    }

    /// Apply an edited time string to the store.
    ///
    /// Returns the time written: the parsed value, or the slot default when
    /// the text cannot be parsed.
    pub fn edit_time(&mut self, slot: ReminderSlot, text: impl Into<String>) -> NaiveTime {
        let text = text.into();
        let time = self.formatter.parse_short_time(&text).unwrap_or_else(|| {
            tracing::debug!("Unparsable {slot} time {text:?}; using default");
            slot.default_time()
        });

        *self.time_text_mut(slot) = text;
        let changed = self.store.update(ChangeOrigin::Editor, |prefs| {
            prefs.set_reminder_time(slot, time);
        });
        if changed.is_empty() {
            // Every edit reschedules, even when it keeps the stored time.
            self.store.notify(slot_field(slot), ChangeOrigin::Editor);
        }
        time
    }

    /// React to a single store change.
    pub async fn handle(&mut self, event: PreferenceEvent) {
        match event.field {
            PreferenceField::MorningNotificationTime => {
                if event.origin == ChangeOrigin::External {
                    self.refresh_time_text(ReminderSlot::Morning);
                }
                self.reschedule().await;
            }
            PreferenceField::EveningNotificationTime => {
                if event.origin == ChangeOrigin::External {
                    self.refresh_time_text(ReminderSlot::Evening);
                }
                self.reschedule().await;
            }
            PreferenceField::EnableNotifications => self.reschedule().await,
            PreferenceField::AppIcon => self.apply_icon().await,
            _ => {}
        }
    }

    /// Handle every queued change without waiting for new ones.
    ///
    /// Returns the number of changes handled.
    pub async fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => self.handle(event).await,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {skipped} preference changes; resynchronising");
                    self.resync().await;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
            handled += 1;
        }
        handled
    }

    /// Handle changes as they arrive. Runs until the task is dropped; the
    /// adapter holds a store handle, so the channel never closes under it.
    pub async fn run(mut self) {
        loop {
            match self.events.recv().await {
                Ok(event) => self.handle(event).await,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {skipped} preference changes; resynchronising");
                    self.resync().await;
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Rebuild everything derived from the store from its latest value.
    pub async fn resync(&mut self) {
        self.refresh_time_text(ReminderSlot::Morning);
        self.refresh_time_text(ReminderSlot::Evening);
        self.reschedule().await;
        self.apply_icon().await;
    }

    async fn reschedule(&self) {
        let prefs = self.store.snapshot();
        self.scheduler
            .on_preferences_changed(
                prefs.enable_notifications,
                prefs.morning_notification_time,
                prefs.evening_notification_time,
            )
            .await;
    }

    async fn apply_icon(&self) {
        if !self.icons.supports_alternate_icons() {
            tracing::debug!("Alternate icons unsupported; ignoring icon change");
            return;
        }
        let icon = self.store.snapshot().app_icon;
        if let Err(error) = self.icons.set_alternate_icon(icon.icon_name()).await {
            tracing::warn!("Failed to switch app icon to {icon}: {error}");
        }
    }

    fn refresh_time_text(&mut self, slot: ReminderSlot) {
        let time = self.store.snapshot().reminder_time(slot);
        *self.time_text_mut(slot) = self.formatter.format_short_time(time);
    }

    fn time_text_mut(&mut self, slot: ReminderSlot) -> &mut String {
        match slot {
            ReminderSlot::Morning => &mut self.morning_time,
            ReminderSlot::Evening => &mut self.evening_time,
        }
    }
}

const fn slot_field(slot: ReminderSlot) -> PreferenceField {
    match slot {
        ReminderSlot::Morning => PreferenceField::MorningNotificationTime,
        ReminderSlot::Evening => PreferenceField::EveningNotificationTime,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{Error, Result};
    use crate::format::TimeLocale;
    use crate::icon::UnsupportedIconSwitcher;
    use crate::models::{AppIcon, Preferences, ReminderRequest, ThemeMode};
    use crate::notifications::InMemoryNotificationCenter;

    #[derive(Clone, Default)]
    struct RecordingIconSwitcher {
        calls: Arc<Mutex<Vec<Option<String>>>>,
        fail: bool,
    }

    impl RecordingIconSwitcher {
        fn calls(&self) -> Vec<Option<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl IconSwitcher for RecordingIconSwitcher {
        async fn set_alternate_icon(&self, name: Option<&str>) -> Result<()> {
            self.calls.lock().unwrap().push(name.map(ToString::to_string));
            if self.fail {
                Err(Error::IconSwitch("icon assets missing".into()))
            } else {
                Ok(())
            }
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn setup(
        prefs: Preferences,
    ) -> (
        SettingsSync<InMemoryNotificationCenter, RecordingIconSwitcher>,
        InMemoryNotificationCenter,
        RecordingIconSwitcher,
    ) {
        let store = PreferencesStore::new(prefs);
        let center = InMemoryNotificationCenter::new();
        let icons = RecordingIconSwitcher::default();
        let sync = SettingsSync::new(
            store,
            TimeFormatter::new(TimeLocale::EnUs),
            ReminderScheduler::new(center.clone()),
            icons.clone(),
        );
        (sync, center, icons)
    }

    async fn pending(center: &InMemoryNotificationCenter) -> Vec<ReminderRequest> {
        let mut pending = center.pending().await.unwrap();
        pending.sort_by(|a, b| a.id.cmp(&b.id));
        pending
    }

    #[tokio::test]
    async fn construction_publishes_text_without_side_effects() {
        let (mut sync, center, icons) = setup(Preferences::default());

        assert_eq!(sync.morning_time(), "8:00 AM");
        assert_eq!(sync.evening_time(), "8:00 PM");
        assert_eq!(sync.pump().await, 0);
        assert!(center.pending().await.unwrap().is_empty());
        assert!(icons.calls().is_empty());
    }

    #[tokio::test]
    async fn edited_time_is_written_and_rescheduled() {
        let (mut sync, center, _) = setup(Preferences::default());

        let applied = sync.edit_time(ReminderSlot::Morning, "5:30 AM");
        assert_eq!(applied, at(5, 30));
        assert_eq!(sync.store().snapshot().morning_notification_time, at(5, 30));

        assert_eq!(sync.pump().await, 1);
        assert_eq!(
            pending(&center).await,
            vec![
                ReminderRequest::daily(ReminderSlot::Evening, at(20, 0)),
                ReminderRequest::daily(ReminderSlot::Morning, at(5, 30)),
            ]
        );
    }

    #[tokio::test]
    async fn unchanged_time_edit_still_reschedules() {
        let (mut sync, center, _) = setup(Preferences::default());

        let applied = sync.edit_time(ReminderSlot::Morning, "8:00 AM");
        assert_eq!(applied, at(8, 0));
        assert_eq!(sync.pump().await, 1);
        assert_eq!(
            pending(&center).await,
            vec![
                ReminderRequest::daily(ReminderSlot::Evening, at(20, 0)),
                ReminderRequest::daily(ReminderSlot::Morning, at(8, 0)),
            ]
        );

        // A cleared schedule is repaired by re-entering the same time
        center.remove_all_pending().await.unwrap();
        sync.edit_time(ReminderSlot::Evening, "8:00 PM");
        sync.pump().await;
        assert_eq!(pending(&center).await.len(), 2);
        assert_eq!(sync.evening_time(), "8:00 PM");
    }

    #[tokio::test]
    async fn lagging_receiver_resyncs_to_latest_snapshot() {
        let (mut sync, center, icons) = setup(Preferences::default());

        for minute in 0..60 {
            sync.store().update(ChangeOrigin::External, |prefs| {
                prefs.morning_notification_time = at(5, minute);
                prefs.app_icon = if minute % 2 == 0 {
                    AppIcon::Ink
                } else {
                    AppIcon::Light
                };
            });
        }
        sync.store().update(ChangeOrigin::External, |prefs| {
            prefs.morning_notification_time = at(6, 6);
            prefs.evening_notification_time = at(21, 30);
            prefs.app_icon = AppIcon::Dark;
        });

        assert!(sync.pump().await > 0);

        assert_eq!(sync.morning_time(), "6:06 AM");
        assert_eq!(sync.evening_time(), "9:30 PM");
        assert_eq!(
            pending(&center).await,
            vec![
                ReminderRequest::daily(ReminderSlot::Evening, at(21, 30)),
                ReminderRequest::daily(ReminderSlot::Morning, at(6, 6)),
            ]
        );
        assert_eq!(icons.calls().last(), Some(&Some("AppIconDark".to_string())));
    }

    #[tokio::test]
    async fn unparsable_time_falls_back_to_slot_default() {
        let mut prefs = Preferences::default();
        prefs.evening_notification_time = at(18, 15);
        let (mut sync, _, _) = setup(prefs);

        let applied = sync.edit_time(ReminderSlot::Evening, "after maghrib");
        assert_eq!(applied, ReminderSlot::Evening.default_time());
        assert_eq!(
            sync.store().snapshot().evening_notification_time,
            ReminderSlot::Evening.default_time()
        );
    }

    #[tokio::test]
    async fn editor_changes_are_not_echoed_back() {
        let (mut sync, _, _) = setup(Preferences::default());

        sync.edit_time(ReminderSlot::Morning, " 6:15 am ");
        sync.pump().await;

        assert_eq!(sync.morning_time(), " 6:15 am ");
    }

    #[tokio::test]
    async fn external_changes_refresh_text() {
        let (mut sync, center, _) = setup(Preferences::default());

        sync.store().update(ChangeOrigin::External, |prefs| {
            prefs.evening_notification_time = at(21, 45);
        });
        sync.pump().await;

        assert_eq!(sync.evening_time(), "9:45 PM");
        assert_eq!(pending(&center).await.len(), 2);
    }

    #[tokio::test]
    async fn disabling_clears_reminders() {
        let (mut sync, center, _) = setup(Preferences::default());

        sync.edit_time(ReminderSlot::Morning, "4:00 AM");
        sync.pump().await;
        assert_eq!(pending(&center).await.len(), 2);

        sync.store().update(ChangeOrigin::External, |prefs| {
            prefs.enable_notifications = false;
        });
        sync.pump().await;
        assert!(center.pending().await.unwrap().is_empty());

        // Editing while disabled keeps the schedule empty
        sync.edit_time(ReminderSlot::Evening, "7:00 PM");
        sync.pump().await;
        assert!(center.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn icon_change_switches_platform_icon() {
        let (mut sync, center, icons) = setup(Preferences::default());

        sync.store()
            .update(ChangeOrigin::External, |prefs| prefs.app_icon = AppIcon::Dark);
        sync.store()
            .update(ChangeOrigin::External, |prefs| prefs.app_icon = AppIcon::Gold);
        sync.pump().await;

        // Both events read the latest snapshot
        assert_eq!(icons.calls(), vec![None, None]);
        assert!(center.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn icon_failures_are_swallowed() {
        let store = PreferencesStore::new(Preferences::default());
        let icons = RecordingIconSwitcher {
            fail: true,
            ..RecordingIconSwitcher::default()
        };
        let mut sync = SettingsSync::new(
            store.clone(),
            TimeFormatter::default(),
            ReminderScheduler::new(InMemoryNotificationCenter::new()),
            icons.clone(),
        );

        store.update(ChangeOrigin::External, |prefs| prefs.app_icon = AppIcon::Ink);
        sync.pump().await;

        assert_eq!(icons.calls(), vec![Some("AppIconInk".to_string())]);
    }

    #[tokio::test]
    async fn unsupported_devices_skip_icon_switch() {
        let store = PreferencesStore::new(Preferences::default());
        let mut sync = SettingsSync::new(
            store.clone(),
            TimeFormatter::default(),
            ReminderScheduler::new(InMemoryNotificationCenter::new()),
            UnsupportedIconSwitcher,
        );
        assert!(!sync.can_change_icon());

        store.update(ChangeOrigin::External, |prefs| prefs.app_icon = AppIcon::Ink);
        assert_eq!(sync.pump().await, 1);
    }

    #[tokio::test]
    async fn unrelated_fields_do_not_reschedule() {
        let (mut sync, center, icons) = setup(Preferences::default());

        sync.store().update(ChangeOrigin::External, |prefs| {
            prefs.theme = ThemeMode::Dark;
            prefs.font_size = 24;
        });
        assert_eq!(sync.pump().await, 2);

        assert!(center.pending().await.unwrap().is_empty());
        assert!(icons.calls().is_empty());
    }

    #[tokio::test]
    async fn run_processes_queued_changes() {
        let (sync, center, _) = setup(Preferences::default());
        let store = sync.store().clone();

        store.update(ChangeOrigin::External, |prefs| {
            prefs.morning_notification_time = at(3, 30);
        });
        let _ = tokio::time::timeout(Duration::from_millis(50), sync.run()).await;

        assert_eq!(
            pending(&center).await[1],
            ReminderRequest::daily(ReminderSlot::Morning, at(3, 30))
        );
    }

    #[test]
    fn picker_options_use_the_formatter() {
        let (sync, _, _) = setup(Preferences::default());
        let morning = sync.morning_options();
        assert_eq!(morning.len(), 23);
        assert_eq!(morning[0], "2:00 AM");
        assert_eq!(morning[22], "1:00 PM");
        assert_eq!(sync.evening_options().last().map(String::as_str), Some("12:00 AM"));
    }
}
