//! Notification service abstraction

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::models::ReminderRequest;

/// Trait for the platform's local notification service (async)
#[allow(async_fn_in_trait)]
pub trait NotificationCenter {
    /// Remove already delivered notifications with the given ids
    async fn remove_delivered(&self, ids: &[String]) -> Result<()>;

    /// Remove pending requests with the given ids
    async fn remove_pending(&self, ids: &[String]) -> Result<()>;

    /// Remove every pending request
    async fn remove_all_pending(&self) -> Result<()>;

    /// Register a request, replacing any pending request with the same id
    async fn add(&self, request: ReminderRequest) -> Result<()>;

    /// Requests waiting to fire
    async fn pending(&self) -> Result<Vec<ReminderRequest>>;

    /// Notifications that already fired and are still listed
    async fn delivered(&self) -> Result<Vec<ReminderRequest>>;
}

#[derive(Debug, Default)]
struct CenterState {
    pending: Vec<ReminderRequest>,
    delivered: Vec<ReminderRequest>,
}

/// Process-local notification center.
///
/// Clones share the same state, so one handle can be given to the scheduler
/// while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationCenter {
    state: Arc<Mutex<CenterState>>,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate delivery of a pending request. Repeating requests stay pending.
    pub fn deliver(&self, id: &str) -> bool {
        let mut state = self.lock();
        let Some(index) = state.pending.iter().position(|request| request.id == id) else {
            return false;
        };
        let request = if state.pending[index].trigger.repeats {
            state.pending[index].clone()
        } else {
            state.pending.remove(index)
        };
        state.delivered.push(request);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    async fn remove_delivered(&self, ids: &[String]) -> Result<()> {
        self.lock()
            .delivered
            .retain(|request| !ids.contains(&request.id));
        Ok(())
    }

    async fn remove_pending(&self, ids: &[String]) -> Result<()> {
        self.lock()
            .pending
            .retain(|request| !ids.contains(&request.id));
        Ok(())
    }

    async fn remove_all_pending(&self) -> Result<()> {
        self.lock().pending.clear();
        Ok(())
    }

    async fn add(&self, request: ReminderRequest) -> Result<()> {
        let mut state = self.lock();
        state.pending.retain(|existing| existing.id != request.id);
        state.pending.push(request);
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<ReminderRequest>> {
        Ok(self.lock().pending.clone())
    }

    async fn delivered(&self) -> Result<Vec<ReminderRequest>> {
        Ok(self.lock().delivered.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ReminderSlot;

    fn request(slot: ReminderSlot, hour: u32) -> ReminderRequest {
        ReminderRequest::daily(slot, NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn add_replaces_request_with_same_id() {
        let center = InMemoryNotificationCenter::new();
        center.add(request(ReminderSlot::Morning, 6)).await.unwrap();
        center.add(request(ReminderSlot::Morning, 7)).await.unwrap();

        let pending = center.pending().await.unwrap();
        assert_eq!(pending, vec![request(ReminderSlot::Morning, 7)]);
    }

    #[tokio::test]
    async fn deliver_keeps_repeating_request_pending() {
        let center = InMemoryNotificationCenter::new();
        center.add(request(ReminderSlot::Evening, 20)).await.unwrap();

        assert!(center.deliver("evening"));
        assert!(!center.deliver("morning"));
        assert_eq!(center.pending().await.unwrap().len(), 1);
        assert_eq!(center.delivered().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removing_unknown_ids_is_a_no_op() {
        let center = InMemoryNotificationCenter::new();
        center.remove_delivered(&ReminderSlot::ids()).await.unwrap();
        center.remove_pending(&ReminderSlot::ids()).await.unwrap();
        assert!(center.pending().await.unwrap().is_empty());
    }
}
