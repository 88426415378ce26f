//! Notification content and the tray's view of a displayed notification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier the tray assigns to a displayed notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Data attached to a notification for retrieval at click time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// Opaque click target (path or URL).
    #[serde(
        rename = "clickAction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub click_action: Option<String>,
}

impl NotificationData {
    pub fn with_click_action(click_action: impl Into<String>) -> Self {
        Self {
            click_action: Some(click_action.into()),
        }
    }
}

/// What the tray is asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub icon: String,
    #[serde(default)]
    pub data: NotificationData,
}

/// A notification currently owned by the host tray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayedNotification {
    pub id: NotificationId,
    #[serde(flatten)]
    pub content: NotificationContent,
    pub shown_at: DateTime<Utc>,
}

impl DisplayedNotification {
    /// Wrap content with a fresh identifier and the current time.
    pub fn new(content: NotificationContent) -> Self {
        Self {
            id: NotificationId::generate(),
            content,
            shown_at: Utc::now(),
        }
    }

    /// Click target attached at display time, if any.
    pub fn click_action(&self) -> Option<&str> {
        self.content.data.click_action.as_deref()
    }
}
