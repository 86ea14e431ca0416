use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Success,
    Error,
    Warning,
    Info,
    Badge,
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationCategory::Success => "success",
            NotificationCategory::Error => "error",
            NotificationCategory::Warning => "warning",
            NotificationCategory::Info => "info",
            NotificationCategory::Badge => "badge",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: NotificationCategory::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for user-facing notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink for redirects; the core only ever tells it where to go.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
