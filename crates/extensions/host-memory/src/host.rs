//! In-memory notification tray and window manager.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use pushgate_protocols::{
    ClientWindow, DisplayedNotification, HostError, MatchOptions, NotificationContent,
    NotificationId, NotificationTray, WindowId, WindowManager,
};

/// Every call the host received, in order per operation.
#[derive(Debug, Clone, Default)]
pub struct HostCalls {
    pub show: usize,
    pub close: usize,
    pub match_all: usize,
    pub focus: usize,
    pub open_window: usize,
    pub closed_ids: Vec<NotificationId>,
    pub match_options: Vec<MatchOptions>,
    pub focused: Vec<WindowId>,
    pub opened_urls: Vec<String>,
}

/// Simulated host.
///
/// Failure switches let tests exercise every error path of the worker.
#[derive(Default)]
pub struct MemoryHost {
    tray: Mutex<Vec<DisplayedNotification>>,
    windows: Mutex<Vec<ClientWindow>>,
    calls: Mutex<HostCalls>,
    deny_permission: AtomicBool,
    fail_match_all: AtomicBool,
    fail_focus: AtomicBool,
    fail_open: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `windows` open, in this enumeration order.
    pub fn with_windows(windows: Vec<ClientWindow>) -> Self {
        let host = Self::new();
        *host.windows.lock() = windows;
        host
    }

    pub fn add_window(&self, window: ClientWindow) {
        self.windows.lock().push(window);
    }

    /// Close a window as the user would.
    pub fn remove_window(&self, id: &WindowId) -> bool {
        let mut windows = self.windows.lock();
        let before = windows.len();
        windows.retain(|w| &w.id != id);
        windows.len() != before
    }

    pub fn windows_snapshot(&self) -> Vec<ClientWindow> {
        self.windows.lock().clone()
    }

    pub fn displayed_snapshot(&self) -> Vec<DisplayedNotification> {
        self.tray.lock().clone()
    }

    pub fn displayed_count(&self) -> usize {
        self.tray.lock().len()
    }

    /// Dismiss a notification without a click, as the user would.
    pub fn dismiss(&self, id: &NotificationId) -> bool {
        let mut tray = self.tray.lock();
        let before = tray.len();
        tray.retain(|n| &n.id != id);
        tray.len() != before
    }

    pub fn calls(&self) -> HostCalls {
        self.calls.lock().clone()
    }

    pub fn deny_permission(&self, deny: bool) {
        self.deny_permission.store(deny, Ordering::SeqCst);
    }

    pub fn fail_match_all(&self, fail: bool) {
        self.fail_match_all.store(fail, Ordering::SeqCst);
    }

    pub fn fail_focus(&self, fail: bool) {
        self.fail_focus.store(fail, Ordering::SeqCst);
    }

    pub fn fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    /// Delay every host operation by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl NotificationTray for MemoryHost {
    async fn show(&self, content: NotificationContent) -> Result<DisplayedNotification, HostError> {
        self.calls.lock().show += 1;
        self.simulate_latency().await;

        if self.deny_permission.load(Ordering::SeqCst) {
            return Err(HostError::PermissionDenied);
        }

        let notification = DisplayedNotification::new(content);
        debug!(notification_id = %notification.id, "Memory tray: show");
        self.tray.lock().push(notification.clone());
        Ok(notification)
    }

    async fn close(&self, id: &NotificationId) -> Result<(), HostError> {
        {
            let mut calls = self.calls.lock();
            calls.close += 1;
            calls.closed_ids.push(id.clone());
        }
        self.simulate_latency().await;

        let removed = self.dismiss(id);
        debug!(notification_id = %id, removed, "Memory tray: close");
        Ok(())
    }

    async fn get(&self, id: &NotificationId) -> Option<DisplayedNotification> {
        self.tray.lock().iter().find(|n| &n.id == id).cloned()
    }

    async fn displayed(&self) -> Vec<DisplayedNotification> {
        self.displayed_snapshot()
    }
}

#[async_trait]
impl WindowManager for MemoryHost {
    async fn match_all(&self, options: MatchOptions) -> Result<Vec<ClientWindow>, HostError> {
        {
            let mut calls = self.calls.lock();
            calls.match_all += 1;
            calls.match_options.push(options);
        }
        self.simulate_latency().await;

        if self.fail_match_all.load(Ordering::SeqCst) {
            return Err(HostError::Unsupported("clients.matchAll".to_string()));
        }

        Ok(self
            .windows
            .lock()
            .iter()
            .filter(|w| options.include_uncontrolled || w.controlled)
            .cloned()
            .collect())
    }

    async fn focus(&self, id: &WindowId) -> Result<ClientWindow, HostError> {
        {
            let mut calls = self.calls.lock();
            calls.focus += 1;
            calls.focused.push(id.clone());
        }
        self.simulate_latency().await;

        if self.fail_focus.load(Ordering::SeqCst) {
            return Err(HostError::WindowUnavailable(id.to_string()));
        }

        let mut windows = self.windows.lock();
        if !windows.iter().any(|w| &w.id == id && w.focusable) {
            return Err(HostError::WindowUnavailable(id.to_string()));
        }

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
        {
            let mut calls = self.calls.lock();
            calls.open_window += 1;
            calls.opened_urls.push(url.to_string());
        }
        self.simulate_latency().await;

        if self.fail_open.load(Ordering::SeqCst) {
            return Err(HostError::OpenFailed(url.to_string()));
        }

        let mut window = ClientWindow::new(url);
        window.focused = true;

        let mut windows = self.windows.lock();
        for existing in windows.iter_mut() {
            existing.focused = false;
        }
        windows.push(window.clone());
        Ok(Some(window))
    }
}
