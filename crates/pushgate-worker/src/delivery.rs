//! Background delivery agent: push payload to host notification.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use pushgate_protocols::{
    DisplayedNotification, NotificationContent, NotificationData, NotificationTray, PushPayload,
};

use crate::dedupe::RecentMessageIds;
use crate::metrics::WorkerMetrics;

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;

/// Values substituted for missing payload fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDefaults {
    pub title: String,
    pub body: String,
    pub click_action: String,
    pub icon: String,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            title: "알림".to_string(),
            body: "내용이 없습니다".to_string(),
            click_action: "/".to_string(),
            icon: "/logo192.png".to_string(),
        }
    }
}

/// Resolve the notification to display for `payload`.
///
/// `title`, `body` and `click_action` are read from the payload's data bag
/// and replaced by the defaults when absent. Pure and deterministic.
pub fn resolve_content(payload: &PushPayload, defaults: &NotificationDefaults) -> NotificationContent {
    NotificationContent {
        title: payload.title().unwrap_or(defaults.title.as_str()).to_string(),
        body: payload.body().unwrap_or(defaults.body.as_str()).to_string(),
        icon: defaults.icon.clone(),
        data: NotificationData::with_click_action(
            payload.click_action().unwrap_or(defaults.click_action.as_str()),
        ),
    }
}

/// What happened to one push.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// The tray accepted the notification.
    Shown { notification: DisplayedNotification },
    /// The tray refused; the push is silently lost to the user.
    Dropped { reason: String },
    /// The message id was already delivered recently.
    Duplicate { message_id: String },
}

impl DeliveryOutcome {
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }
}

/// Stateless push handler.
///
/// Holds only its capabilities and configuration; every push is handled
/// independently, with no retry and no coalescing.
#[derive(Clone)]
pub struct DeliveryAgent {
    tray: Arc<dyn NotificationTray>,
    defaults: Arc<NotificationDefaults>,
    history: Option<Arc<RecentMessageIds>>,
    metrics: Arc<WorkerMetrics>,
}

impl DeliveryAgent {
    pub fn new(tray: Arc<dyn NotificationTray>, defaults: NotificationDefaults) -> Self {
        Self {
            tray,
            defaults: Arc::new(defaults),
            history: None,
            metrics: Arc::new(WorkerMetrics::new()),
        }
    }

    /// Skip pushes whose `message_id` is still in `history`.
    pub fn with_history(mut self, history: Arc<RecentMessageIds>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<WorkerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn defaults(&self) -> &NotificationDefaults {
        &self.defaults
    }

    /// Show one notification for `payload`.
    pub async fn deliver(&self, payload: PushPayload) -> DeliveryOutcome {
        WorkerMetrics::incr(&self.metrics.pushes_received);

        if let (Some(history), Some(message_id)) = (&self.history, &payload.message_id) {
            if !history.insert(message_id) {
                debug!(message_id = %message_id, "Skipping repeated push");
                WorkerMetrics::incr(&self.metrics.duplicates_skipped);
                return DeliveryOutcome::Duplicate {
                    message_id: message_id.clone(),
                };
            }
        }

        let content = resolve_content(&payload, &self.defaults);
        debug!(
            title = %content.title,
            click_action = ?content.data.click_action,
            used_fallback_title = payload.title().is_none(),
            used_fallback_body = payload.body().is_none(),
            "Resolved push payload"
        );

        match self.tray.show(content).await {
            Ok(notification) => {
                info!(
                    notification_id = %notification.id,
                    click_action = ?notification.click_action(),
                    "Notification shown"
                );
                WorkerMetrics::incr(&self.metrics.notifications_shown);
                DeliveryOutcome::Shown { notification }
            }
            Err(e) => {
                warn!(error = %e, "Host refused to show notification, dropping push");
                // A redelivery of this message must get another chance.
                if let (Some(history), Some(message_id)) = (&self.history, &payload.message_id) {
                    history.remove(message_id);
                }
                WorkerMetrics::incr(&self.metrics.deliveries_dropped);
                DeliveryOutcome::Dropped {
                    reason: e.to_string(),
                }
            }
        }
    }
}
