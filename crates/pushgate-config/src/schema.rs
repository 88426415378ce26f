//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub worker: WorkerConfig,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Fallbacks applied when a push payload omits a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Title used when `data.title` is missing.
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Body used when `data.body` is missing.
    #[serde(default = "default_fallback_body")]
    pub fallback_body: String,

    /// Click target used when `data.click_action` is missing.
    #[serde(default = "default_click_action")]
    pub default_click_action: String,

    /// Static icon attached to every notification.
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            fallback_title: default_fallback_title(),
            fallback_body: default_fallback_body(),
            default_click_action: default_click_action(),
            icon: default_icon(),
        }
    }
}

fn default_fallback_title() -> String {
    "알림".to_string()
}

fn default_fallback_body() -> String {
    "내용이 없습니다".to_string()
}

fn default_click_action() -> String {
    "/".to_string()
}

fn default_icon() -> String {
    "/logo192.png".to_string()
}

/// Event dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Capacity of the inbound event queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Size of the recent message-id history used to drop repeated pushes.
    /// Zero disables deduplication.
    #[serde(default)]
    pub dedupe_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            dedupe_capacity: 0,
        }
    }
}

fn default_queue_capacity() -> usize {
    256
}

/// Which host implementation backs the tray and window manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKind {
    /// In-process simulated host.
    #[default]
    Memory,
    /// OS notifications and the system URL opener.
    Desktop,
}

/// Host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub kind: HostKind,

    /// Origin relative click actions are resolved against when opening windows.
    #[serde(default = "default_app_origin")]
    pub app_origin: String,

    /// Override for the command used to open URLs (`xdg-open` / `open`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_command: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            kind: HostKind::default(),
            app_origin: default_app_origin(),
            open_command: None,
        }
    }
}

fn default_app_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Number of daily log files to keep.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".pushgate").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".pushgate/logs"))
}

fn default_max_log_files() -> usize {
    30
}
