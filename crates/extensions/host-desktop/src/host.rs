//! Desktop notification tray and browser window manager.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use pushgate_protocols::{
    ClientWindow, DisplayedNotification, HostError, MatchOptions, NotificationContent,
    NotificationId, NotificationTray, WindowId, WindowManager,
};

use crate::command::{resolve_url, DesktopCommand};

/// Desktop host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopHostConfig {
    /// Origin relative click actions are resolved against.
    pub app_origin: String,
    /// Replaces `xdg-open` / `open` when set.
    pub open_command: Option<String>,
}

impl Default for DesktopHostConfig {
    fn default() -> Self {
        Self {
            app_origin: "http://localhost:3000".to_string(),
            open_command: None,
        }
    }
}

/// Host backed by the local desktop session.
///
/// Windows are recorded under the click action that opened them, so a later
/// click on the same action finds the tab again.
pub struct DesktopHost {
    config: DesktopHostConfig,
    tray: RwLock<Vec<DisplayedNotification>>,
    windows: RwLock<Vec<ClientWindow>>,
}

impl DesktopHost {
    pub fn new(config: DesktopHostConfig) -> Self {
        Self {
            config,
            tray: RwLock::new(Vec::new()),
            windows: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &DesktopHostConfig {
        &self.config
    }

    async fn launch(&self, target: &str) -> Result<(), HostError> {
        let url = resolve_url(&self.config.app_origin, target)?;
        let cmd = DesktopCommand::open_url(url.as_str(), self.config.open_command.as_deref())
            .ok_or_else(|| HostError::Unsupported("no URL opener for this platform".to_string()))?;

        debug!(url = %url, program = %cmd.program, "Launching browser");
        cmd.run(HostError::OpenFailed).await
    }
}

impl Default for DesktopHost {
    fn default() -> Self {
        Self::new(DesktopHostConfig::default())
    }
}

#[async_trait]
impl NotificationTray for DesktopHost {
    async fn show(&self, content: NotificationContent) -> Result<DisplayedNotification, HostError> {
        // notify-send only takes icon names or local files.
        let icon = Some(content.icon.as_str()).filter(|icon| Path::new(icon).is_file());
        let cmd = DesktopCommand::notification(&content.title, &content.body, icon).ok_or_else(
            || HostError::Unsupported("no desktop notifier for this platform".to_string()),
        )?;

        cmd.run(HostError::DisplayFailed).await?;

        let notification = DisplayedNotification::new(content);
        info!(notification_id = %notification.id, "Desktop notification shown");
        self.tray.write().push(notification.clone());
        Ok(notification)
    }

    async fn close(&self, id: &NotificationId) -> Result<(), HostError> {
        // The notifier owns the popup; closing forgets our record of it.
        self.tray.write().retain(|n| &n.id != id);
        Ok(())
    }

    async fn get(&self, id: &NotificationId) -> Option<DisplayedNotification> {
        self.tray.read().iter().find(|n| &n.id == id).cloned()
    }

    async fn displayed(&self) -> Vec<DisplayedNotification> {
        self.tray.read().clone()
    }
}

#[async_trait]
impl WindowManager for DesktopHost {
    async fn match_all(&self, options: MatchOptions) -> Result<Vec<ClientWindow>, HostError> {
        Ok(self
            .windows
            .read()
            .iter()
            .filter(|w| options.include_uncontrolled || w.controlled)
            .cloned()
            .collect())
    }

    async fn focus(&self, id: &WindowId) -> Result<ClientWindow, HostError> {
        let url = self
            .windows
            .read()
            .iter()
            .find(|w| &w.id == id)
            .map(|w| w.url.clone())
            .ok_or_else(|| HostError::WindowUnavailable(id.to_string()))?;

        // Re-opening the URL is the only way to raise a browser tab from here.
        self.launch(&url).await?;

        let mut windows = self.windows.write();
        let mut focused = None;
        for window in windows.iter_mut() {
            window.focused = &window.id == id;
            if window.focused {
                focused = Some(window.clone());
            }
        }
        focused.ok_or_else(|| HostError::WindowUnavailable(id.to_string()))
    }

    async fn open_window(&self, url: &str) -> Result<Option<ClientWindow>, HostError> {
        if let Err(e) = self.launch(url).await {
            warn!(url, error = %e, "Failed to open window");
            return Err(e);
        }

        let mut window = ClientWindow::new(url);
        window.focused = true;

        let mut windows = self.windows.write();
        for other in windows.iter_mut() {
            other.focused = false;
        }
        windows.push(window.clone());
        Ok(Some(window))
    }
}
