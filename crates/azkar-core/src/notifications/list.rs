//! Diagnostic list of scheduled notifications (test builds only)

use std::future::Future;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::format::TimeFormatter;
use crate::models::ReminderRequest;
use crate::notifications::NotificationCenter;

/// Anything that can be shown as a row in the diagnostic list
pub trait UserNotification {
    fn title(&self) -> &str;
    fn body(&self) -> Option<&str>;
    /// When the notification fires next (or fired)
    fn date(&self) -> NaiveDateTime;
    /// Opaque debug text; not meant to be parsed
    fn details(&self) -> String;
}

impl UserNotification for ReminderRequest {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    fn date(&self) -> NaiveDateTime {
        self.trigger.next_fire_after(Local::now().naive_local())
    }

    fn details(&self) -> String {
        format!("{:?}\n\n{:?}", self.trigger, self)
    }
}

/// Presentation row for a single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRow {
    /// 0-based position in the snapshot
    pub row: usize,
    pub title: String,
    pub body: Option<String>,
    pub date: String,
    pub details: String,
}

/// Rows built once from a snapshot of scheduled notifications.
///
/// The list does not follow later changes; build a new one to refresh.
#[derive(Debug, Clone, Default)]
pub struct NotificationsList {
    rows: Vec<NotificationRow>,
}

impl NotificationsList {
    /// Run `fetch` once and map its result to rows.
    pub async fn load<F, Fut, T>(fetch: F, formatter: TimeFormatter) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<T>>,
        T: UserNotification,
    {
        let notifications = fetch().await;
        let rows = notifications
            .iter()
            .enumerate()
            .map(|(row, notification)| NotificationRow {
                row,
                title: notification.title().to_string(),
                body: notification.body().map(ToString::to_string),
                date: formatter.format_short_datetime(notification.date()),
                details: notification.details(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[NotificationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Empty the list, then ask the platform to drop every pending request.
    pub async fn clear_all<N: NotificationCenter>(&mut self, center: &N) {
        self.rows.clear();
        if let Err(error) = center.remove_all_pending().await {
            tracing::warn!("Failed to remove pending notifications: {error}");
        }
    }
}

/// Pending then delivered reminders; a failing query contributes nothing.
pub async fn fetch_scheduled<N: NotificationCenter>(center: &N) -> Vec<ReminderRequest> {
    let mut notifications = center.pending().await.unwrap_or_else(|error| {
        tracing::warn!("Failed to fetch pending notifications: {error}");
        Vec::new()
    });
    match center.delivered().await {
        Ok(delivered) => notifications.extend(delivered),
        Err(error) => tracing::warn!("Failed to fetch delivered notifications: {error}"),
    }
    notifications
}
