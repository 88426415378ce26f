//! Host capability traits.
//!
//! The worker never touches host globals directly: everything it needs from
//! the environment (the notification tray and the window manager) is
//! injected through these traits so a fake can stand in for tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostError;
use crate::types::{
    ClientWindow, DisplayedNotification, MatchOptions, NotificationContent, NotificationId,
    WindowId,
};

/// Host notification tray.
#[async_trait]
pub trait NotificationTray: Send + Sync {
    /// Display a notification and return the tray's record of it.
    async fn show(&self, content: NotificationContent) -> Result<DisplayedNotification, HostError>;

    /// Retire a notification.
    ///
    /// Closing an unknown or already-closed notification must return
    /// `Ok(())` and have no further effect.
    async fn close(&self, id: &NotificationId) -> Result<(), HostError>;

    /// Look up a notification still held by the tray.
    async fn get(&self, id: &NotificationId) -> Option<DisplayedNotification>;

    /// Notifications currently held by the tray, oldest first.
    async fn displayed(&self) -> Vec<DisplayedNotification>;
}

/// Host window manager.
#[async_trait]
pub trait WindowManager: Send + Sync {
    /// Enumerate open windows in host order.
    async fn match_all(&self, options: MatchOptions) -> Result<Vec<ClientWindow>, HostError>;

    /// Bring a window to the foreground.
    async fn focus(&self, id: &WindowId) -> Result<ClientWindow, HostError>;

    /// Open a new window at `url`. Hosts that cannot report the new window
    /// return `Ok(None)`.
    async fn open_window(&self, url: &str) -> Result<Option<ClientWindow>, HostError>;
}

/// The capability object handed to event handlers.
#[derive(Clone)]
pub struct HostCapabilities {
    pub tray: Arc<dyn NotificationTray>,
    pub windows: Arc<dyn WindowManager>,
}

impl HostCapabilities {
    pub fn new(tray: Arc<dyn NotificationTray>, windows: Arc<dyn WindowManager>) -> Self {
        Self { tray, windows }
    }

    /// Build from one host object implementing both capabilities.
    pub fn from_host<H>(host: Arc<H>) -> Self
    where
        H: NotificationTray + WindowManager + 'static,
    {
        Self {
            tray: host.clone(),
            windows: host,
        }
    }
}
