//! Foreground notification history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the notification history the backend serves to pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

impl NotificationRecord {
    /// An unread record created now.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            message: message.into(),
            created_at: Utc::now(),
            is_read: false,
        }
    }

    pub fn read(mut self) -> Self {
        self.is_read = true;
        self
    }
}

/// Number of records with `is_read == false`.
pub fn unread_count(records: &[NotificationRecord]) -> usize {
    records.iter().filter(|r| !r.is_read).count()
}
