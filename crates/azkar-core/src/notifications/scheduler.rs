//! Morning and evening reminder scheduling

use chrono::NaiveTime;

use crate::models::{ReminderRequest, ReminderSlot};
use crate::notifications::NotificationCenter;

/// Keeps the two daily reminders in line with the preferences.
///
/// Every change replaces the whole schedule: both fixed ids are removed
/// first, then re-added when reminders are enabled. Platform failures are
/// logged and dropped; nothing at this layer can recover from them.
#[derive(Debug, Clone)]
pub struct ReminderScheduler<N> {
    center: N,
}

impl<N: NotificationCenter> ReminderScheduler<N> {
    pub fn new(center: N) -> Self {
        Self { center }
    }

    pub fn center(&self) -> &N {
        &self.center
    }

    /// React to a change of any reminder-related preference.
    pub async fn on_preferences_changed(
        &self,
        enabled: bool,
        morning: NaiveTime,
        evening: NaiveTime,
    ) {
        self.clear().await;

        if !enabled {
            tracing::debug!("Reminders disabled; schedule cleared");
            return;
        }

        for (slot, time) in [
            (ReminderSlot::Morning, morning),
            (ReminderSlot::Evening, evening),
        ] {
            let request = ReminderRequest::daily(slot, time);
            let (hour, minute) = (request.trigger.hour, request.trigger.minute);
            match self.center.add(request).await {
                Ok(()) => {
                    tracing::info!("Scheduled {slot} reminder at {hour:02}:{minute:02}");
                }
                Err(error) => {
                    tracing::warn!("Failed to schedule {slot} reminder: {error}");
                }
            }
        }
    }

    /// Remove delivered and pending reminders under both fixed ids.
    ///
    /// Removing ids that were never scheduled is a no-op.
    pub async fn clear(&self) {
        let ids = ReminderSlot::ids();
        if let Err(error) = self.center.remove_delivered(&ids).await {
            tracing::warn!("Failed to remove delivered reminders: {error}");
        }
        if let Err(error) = self.center.remove_pending(&ids).await {
            tracing::warn!("Failed to remove pending reminders: {error}");
        }
    }
}
