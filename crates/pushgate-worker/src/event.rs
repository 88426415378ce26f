//! Events delivered to the worker by the host and their outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use pushgate_protocols::{DisplayedNotification, PushPayload};

use crate::delivery::DeliveryOutcome;
use crate::router::RouteOutcome;

/// A user interaction with a displayed notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationClick {
    /// The notification as the tray holds it, including its attached data.
    pub notification: DisplayedNotification,
}

impl NotificationClick {
    pub fn new(notification: DisplayedNotification) -> Self {
        Self { notification }
    }
}

/// An event the host wakes the worker for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerEvent {
    Push { payload: PushPayload },
    NotificationClick { click: NotificationClick },
}

impl WorkerEvent {
    pub fn push(payload: PushPayload) -> Self {
        Self::Push { payload }
    }

    pub fn click(notification: DisplayedNotification) -> Self {
        Self::NotificationClick {
            click: NotificationClick::new(notification),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Push { .. } => EventKind::Push,
            Self::NotificationClick { .. } => EventKind::NotificationClick,
        }
    }
}

/// Event type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Push,
    NotificationClick,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::NotificationClick => "notification_click",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one unit of pending work.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum EventOutcome {
    Delivery(DeliveryOutcome),
    Route(RouteOutcome),
}
