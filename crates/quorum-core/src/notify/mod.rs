//! One-shot user-facing notifications.
//!
//! The core only defines the notification value and the sink seam; how a
//! notification is presented (terminal line, toast, nothing at all) is the
//! consuming interface's concern.

use serde::{Deserialize, Serialize};

/// Severity/kind of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A one-shot notification surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: None,
        }
    }
}

/// Sink a consuming interface registers to receive notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
