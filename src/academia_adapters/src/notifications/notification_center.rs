use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use academia_core::{Notification, NotificationCategory, NotificationSink};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A notification as kept in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRecord {
    pub id: Uuid,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// In-process notification surface with a newest-first history and read flags.
///
/// Clones share the same history.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    history: Arc<Mutex<Vec<NotificationRecord>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NotificationRecord>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All notifications, newest first.
    pub fn history(&self) -> Vec<NotificationRecord> {
        self.lock().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|record| !record.read).count()
    }

    /// Returns `false` when no notification has that id.
    pub fn mark_as_read(&self, id: Uuid) -> bool {
        match self.lock().iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&self) {
        self.lock().iter_mut().for_each(|record| record.read = true);
    }

    pub fn clear_all(&self) {
        self.lock().clear();
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(NotificationCategory::Success, title.into(), message.into())
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(NotificationCategory::Info, title.into(), message.into())
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(NotificationCategory::Warning, title.into(), message.into())
    }

    pub fn badge(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(NotificationCategory::Badge, title.into(), message.into())
    }

    fn push(&self, category: NotificationCategory, title: String, message: String) -> Uuid {
        match category {
            NotificationCategory::Error | NotificationCategory::Warning => {
                tracing::warn!(%category, %title, %message, "Notification");
            }
            _ => tracing::info!(%category, %title, %message, "Notification"),
        }

        let record = NotificationRecord {
            id: Uuid::new_v4(),
            category,
            title,
            message,
            created_at: Utc::now(),
            read: false,
        };
        let id = record.id;
        self.lock().insert(0, record);
        id
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, notification: Notification) {
        self.push(
            notification.category,
            notification.title,
            notification.message,
        );
    }
}
