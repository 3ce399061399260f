//! Toast notifications raised by explicit user actions.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStyle {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub style: NotificationStyle,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Queue of notifications waiting to be shown. Clones share the queue.
#[derive(Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, style: NotificationStyle, message: impl Into<String>) {
        let notification = Notification {
            style,
            message: message.into(),
            raised_at: Utc::now(),
        };
        info!(style = ?notification.style, message = %notification.message, "notification");
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(notification);
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NotificationStyle::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NotificationStyle::Error, message);
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}
