//! Open application windows as observed through the host window manager.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a host window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One open application window.
///
/// A snapshot taken at enumeration time; the host may close or navigate
/// the window at any moment afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientWindow {
    pub id: WindowId,
    /// Exact URL string as reported by the host.
    pub url: String,
    /// Whether the window currently has input focus.
    #[serde(default)]
    pub focused: bool,
    /// Whether the worker controls this window. Windows opened before the
    /// worker registered are uncontrolled.
    #[serde(default)]
    pub controlled: bool,
    /// Whether the host lets this window be focused.
    #[serde(default = "default_focusable")]
    pub focusable: bool,
}

fn default_focusable() -> bool {
    true
}

impl ClientWindow {
    /// A controlled, focusable, unfocused window at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: WindowId::generate(),
            url: url.into(),
            focused: false,
            controlled: true,
            focusable: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = WindowId::new(id);
        self
    }

    pub fn uncontrolled(mut self) -> Self {
        self.controlled = false;
        self
    }

    pub fn unfocusable(mut self) -> Self {
        self.focusable = false;
        self
    }
}

/// Window enumeration options passed to the window manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub include_uncontrolled: bool,
}

impl MatchOptions {
    /// Every window, controlled or not.
    pub fn all_windows() -> Self {
        Self {
            include_uncontrolled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_window_new() {
        let w = ClientWindow::new("/x");
        assert_eq!(w.url, "/x");
        assert!(w.controlled);
        assert!(w.focusable);
        assert!(!w.focused);
    }

    #[test]
    fn test_client_window_builders() {
        let w = ClientWindow::new("/x").with_id("w-1").uncontrolled().unfocusable();
        assert_eq!(w.id.as_str(), "w-1");
        assert!(!w.controlled);
        assert!(!w.focusable);
    }

    #[test]
    fn test_client_window_deserialize_defaults() {
        let w: ClientWindow = serde_json::from_str(r#"{"id": "w-2", "url": "/"}"#).unwrap();
        assert!(w.focusable);
        assert!(!w.controlled);
    }

    #[test]
    fn test_match_options_all_windows() {
        let opts = MatchOptions::all_windows();
        assert!(opts.include_uncontrolled);
        assert!(!MatchOptions::default().include_uncontrolled);
    }
}
