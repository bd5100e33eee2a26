//! libSQL-backed notification center for desktop and CLI clients

use chrono::{NaiveDateTime, Timelike};
use libsql::{params, Connection, Row, Value};

use crate::error::{Error, Result};
use crate::models::{CalendarTrigger, ReminderRequest};
use crate::notifications::NotificationCenter;

const REQUEST_COLUMNS: &str = "id, title, body, sound, trigger_hour, trigger_minute, repeats";

/// Notification center persisting requests in the local database.
///
/// Delivery is driven by the caller through [`Self::deliver_due`]; there is
/// no background timer.
#[derive(Clone)]
pub struct LibSqlNotificationCenter {
    conn: Connection,
}

impl LibSqlNotificationCenter {
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Record delivery of every pending request whose trigger matches `now`.
    ///
    /// A request already delivered during this minute is skipped, so calling
    /// this repeatedly within a minute delivers each reminder once. Returns
    /// the requests delivered by this call.
    pub async fn deliver_due(&self, now: NaiveDateTime) -> Result<Vec<ReminderRequest>> {
        let minute_start = now
            .with_second(0)
            .and_then(|value| value.with_nanosecond(0))
            .unwrap_or(now)
            .and_utc()
            .timestamp();
        let delivered_at = now.and_utc().timestamp();

        let mut due = Vec::new();
        for request in self.pending().await? {
            if !request.trigger.matches(now.time()) {
                continue;
            }
            if self.delivered_since(&request.id, minute_start).await? {
                continue;
            }

            self.insert_delivered(&request, delivered_at).await?;
            if !request.trigger.repeats {
                self.conn
                    .execute(
                        "DELETE FROM pending_reminders WHERE id = ?",
                        [request.id.as_str()],
                    )
                    .await?;
            }
            tracing::info!("Delivered {} reminder", request.id);
            due.push(request);
        }
        Ok(due)
    }

    async fn delivered_since(&self, id: &str, since: i64) -> Result<bool> {
        let mut rows = self
            .conn
            .query(
                "SELECT EXISTS(SELECT 1 FROM delivered_reminders WHERE id = ? AND delivered_at >= ?)",
                params![id, since],
            )
            .await?;
        Ok(match rows.next().await? {
            Some(row) => row.get::<i64>(0)? != 0,
            None => false,
        })
    }

    async fn insert_delivered(&self, request: &ReminderRequest, delivered_at: i64) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO delivered_reminders
                    (id, title, body, sound, trigger_hour, trigger_minute, repeats, delivered_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    request.id.as_str(),
                    request.title.as_str(),
                    body_value(request.body.as_deref()),
                    i64::from(request.sound),
                    i64::from(request.trigger.hour),
                    i64::from(request.trigger.minute),
                    i64::from(request.trigger.repeats),
                    delivered_at,
                ],
            )
            .await?;
        Ok(())
    }

    async fn query_requests(&self, sql: &str) -> Result<Vec<ReminderRequest>> {
        let mut rows = self.conn.query(sql, ()).await?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next().await? {
            requests.push(row_to_request(&row)?);
        }
        Ok(requests)
    }

    async fn delete_ids(&self, table: &str, ids: &[String]) -> Result<()> {
        for id in ids {
            self.conn
                .execute(&format!("DELETE FROM {table} WHERE id = ?"), [id.as_str()])
                .await?;
        }
        Ok(())
    }
}

impl NotificationCenter for LibSqlNotificationCenter {
    async fn remove_delivered(&self, ids: &[String]) -> Result<()> {
        self.delete_ids("delivered_reminders", ids).await
    }

    async fn remove_pending(&self, ids: &[String]) -> Result<()> {
        self.delete_ids("pending_reminders", ids).await
    }

    async fn remove_all_pending(&self) -> Result<()> {
        self.conn.execute("DELETE FROM pending_reminders", ()).await?;
        Ok(())
    }

    async fn add(&self, request: ReminderRequest) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO pending_reminders
                    (id, title, body, sound, trigger_hour, trigger_minute, repeats, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    request.id.as_str(),
                    request.title.as_str(),
                    body_value(request.body.as_deref()),
                    i64::from(request.sound),
                    i64::from(request.trigger.hour),
                    i64::from(request.trigger.minute),
                    i64::from(request.trigger.repeats),
                    chrono::Utc::now().timestamp(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<ReminderRequest>> {
        self.query_requests(&format!(
            "SELECT {REQUEST_COLUMNS} FROM pending_reminders ORDER BY trigger_hour, trigger_minute"
        ))
        .await
    }

    async fn delivered(&self) -> Result<Vec<ReminderRequest>> {
        self.query_requests(&format!(
            "SELECT {REQUEST_COLUMNS} FROM delivered_reminders ORDER BY delivered_at"
        ))
        .await
    }
}

fn body_value(body: Option<&str>) -> Value {
    body.map_or(Value::Null, |body| Value::Text(body.to_string()))
}

fn row_to_request(row: &Row) -> Result<ReminderRequest> {
    let hour = u32::try_from(row.get::<i64>(4)?)
        .map_err(|_| Error::Database("trigger_hour out of range".into()))?;
    let minute = u32::try_from(row.get::<i64>(5)?)
        .map_err(|_| Error::Database("trigger_minute out of range".into()))?;

    Ok(ReminderRequest {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get::<Option<String>>(2)?,
        sound: row.get::<i64>(3)? != 0,
        trigger: CalendarTrigger {
            hour,
            minute,
            repeats: row.get::<i64>(6)? != 0,
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::Database;
    use crate::models::ReminderSlot;
    use crate::notifications::ReminderScheduler;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn today_at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_replaces_and_lists_pending() {
        let db = Database::open_in_memory().await.unwrap();
        let center = LibSqlNotificationCenter::new(db.connection().clone());

        center
            .add(ReminderRequest::daily(ReminderSlot::Evening, at(19, 0)))
            .await
            .unwrap();
        center
            .add(ReminderRequest::daily(ReminderSlot::Morning, at(5, 0)))
            .await
            .unwrap();
        center
            .add(ReminderRequest::daily(ReminderSlot::Evening, at(20, 30)))
            .await
            .unwrap();

        let pending = center.pending().await.unwrap();
        assert_eq!(
            pending,
            vec![
                ReminderRequest::daily(ReminderSlot::Morning, at(5, 0)),
                ReminderRequest::daily(ReminderSlot::Evening, at(20, 30)),
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scheduler_replaces_schedule_in_database() {
        let db = Database::open_in_memory().await.unwrap();
        let center = LibSqlNotificationCenter::new(db.connection().clone());
        let scheduler = ReminderScheduler::new(center.clone());

        scheduler.on_preferences_changed(true, at(4, 0), at(18, 0)).await;
        scheduler.on_preferences_changed(true, at(6, 0), at(19, 0)).await;
        assert_eq!(center.pending().await.unwrap().len(), 2);

        scheduler.on_preferences_changed(false, at(6, 0), at(19, 0)).await;
        assert!(center.pending().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deliver_due_records_once_per_minute() {
        let db = Database::open_in_memory().await.unwrap();
        let center = LibSqlNotificationCenter::new(db.connection().clone());
        center
            .add(ReminderRequest::daily(ReminderSlot::Morning, at(5, 0)))
            .await
            .unwrap();

        assert!(center.deliver_due(today_at(4, 59, 0)).await.unwrap().is_empty());

        let first = center.deliver_due(today_at(5, 0, 10)).await.unwrap();
        assert_eq!(first.len(), 1);
        let again = center.deliver_due(today_at(5, 0, 40)).await.unwrap();
        assert!(again.is_empty());

        // Repeating reminders stay pending after delivery
        assert_eq!(center.pending().await.unwrap().len(), 1);
        assert_eq!(center.delivered().await.unwrap().len(), 1);

        center.remove_delivered(&ReminderSlot::ids()).await.unwrap();
        assert!(center.delivered().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn remove_all_pending_empties_table() {
        let db = Database::open_in_memory().await.unwrap();
        let center = LibSqlNotificationCenter::new(db.connection().clone());
        center
            .add(ReminderRequest::daily(ReminderSlot::Morning, at(5, 0)))
            .await
            .unwrap();

        center.remove_all_pending().await.unwrap();
        center.remove_all_pending().await.unwrap();
        assert!(center.pending().await.unwrap().is_empty());
    }
}
