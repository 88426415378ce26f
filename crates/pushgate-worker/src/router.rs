//! Notification click routing.
//!
//! One click is a one-shot transaction: close the notification, then either
//! focus the first open window whose URL equals the click target exactly, or
//! open a new window there. URLs are compared as plain strings, so
//! `/item/5` and `/item/5/` are different windows.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use pushgate_protocols::{ClientWindow, HostCapabilities, MatchOptions};

use crate::event::NotificationClick;
use crate::metrics::WorkerMetrics;

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;

/// How a click was resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// An existing window showing the target was focused.
    Focused {
        click_action: String,
        window: ClientWindow,
    },
    /// A new window was opened at the target.
    Opened {
        click_action: String,
        window: Option<ClientWindow>,
    },
    /// The host refused to focus or open.
    Failed { click_action: String, reason: String },
}

impl RouteOutcome {
    pub fn click_action(&self) -> &str {
        match self {
            Self::Focused { click_action, .. }
            | Self::Opened { click_action, .. }
            | Self::Failed { click_action, .. } => click_action,
        }
    }
}

/// First focusable window whose URL is exactly `click_action`, in host order.
pub fn find_window<'a>(windows: &'a [ClientWindow], click_action: &str) -> Option<&'a ClientWindow> {
    windows
        .iter()
        .find(|w| w.focusable && w.url == click_action)
}

/// Stateless click handler.
#[derive(Clone)]
pub struct ClickRouter {
    host: HostCapabilities,
    default_click_action: Arc<str>,
    metrics: Arc<WorkerMetrics>,
}

impl ClickRouter {
    pub fn new(host: HostCapabilities, default_click_action: impl Into<String>) -> Self {
        Self {
            host,
            default_click_action: Arc::from(default_click_action.into()),
            metrics: Arc::new(WorkerMetrics::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<WorkerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Resolve one click.
    pub async fn route(&self, click: NotificationClick) -> RouteOutcome {
        WorkerMetrics::incr(&self.metrics.clicks_received);
        let notification = &click.notification;

        // Retire the tray entry first, whatever happens next.
        if let Err(e) = self.host.tray.close(&notification.id).await {
            warn!(notification_id = %notification.id, error = %e, "Failed to close notification");
            WorkerMetrics::incr(&self.metrics.close_failures);
        }

        let click_action = notification
            .click_action()
            .filter(|s| !s.is_empty())
            .unwrap_or(&*self.default_click_action)
            .to_string();

        // Windows opened before the worker registered are uncontrolled but
        // still have to be matchable.
        let windows = match self.host.windows.match_all(MatchOptions::all_windows()).await {
            Ok(windows) => windows,
            Err(e) => {
                warn!(error = %e, "Window enumeration failed, opening a new window");
                Vec::new()
            }
        };
        debug!(
            notification_id = %notification.id,
            click_action = %click_action,
            open_windows = windows.len(),
            "Routing notification click"
        );

        match find_window(&windows, &click_action) {
            Some(window) => self.focus(window, click_action).await,
            None => self.open(click_action).await,
        }
    }

    async fn focus(&self, window: &ClientWindow, click_action: String) -> RouteOutcome {
        match self.host.windows.focus(&window.id).await {
            Ok(window) => {
                info!(window_id = %window.id, click_action = %click_action, "Focused existing window");
                WorkerMetrics::incr(&self.metrics.windows_focused);
                RouteOutcome::Focused {
                    click_action,
                    window,
                }
            }
            Err(e) => {
                warn!(window_id = %window.id, error = %e, "Failed to focus window");
                WorkerMetrics::incr(&self.metrics.routing_failures);
                RouteOutcome::Failed {
                    click_action,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn open(&self, click_action: String) -> RouteOutcome {
        match self.host.windows.open_window(&click_action).await {
            Ok(window) => {
                info!(click_action = %click_action, "Opened new window");
                WorkerMetrics::incr(&self.metrics.windows_opened);
                RouteOutcome::Opened {
                    click_action,
                    window,
                }
            }
            Err(e) => {
                warn!(click_action = %click_action, error = %e, "Failed to open window");
                WorkerMetrics::incr(&self.metrics.routing_failures);
                RouteOutcome::Failed {
                    click_action,
                    reason: e.to_string(),
                }
            }
        }
    }
}
