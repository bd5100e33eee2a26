//! Daily reminders: notification service seam, scheduler and diagnostic list

mod center;
mod list;
mod scheduler;
mod store;

pub use center::{InMemoryNotificationCenter, NotificationCenter};
pub use list::{fetch_scheduled, NotificationRow, NotificationsList, UserNotification};
pub use scheduler::ReminderScheduler;
pub use store::LibSqlNotificationCenter;
