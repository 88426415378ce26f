//! # Pushgate Protocols
//!
//! Core protocol definitions for the Pushgate push-notification worker.
//! Contains only data types and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`NotificationTray`] - Host facility that displays and retires notifications
//! - [`WindowManager`] - Host facility that enumerates, focuses and opens windows
//! - [`NotificationFeed`] - Boundary of the in-page notification list
//!
//! ## Core Types
//!
//! - [`PushPayload`] - Untrusted message from the remote push service
//! - [`NotificationContent`] / [`DisplayedNotification`] - What the tray shows
//! - [`ClientWindow`] - One open application window, observed transiently
//! - [`NotificationRecord`] - Foreground notification history entry

pub mod error;
pub mod feed;
pub mod host;
pub mod types;

pub use error::{FeedError, HostError};
pub use feed::NotificationFeed;
pub use host::{HostCapabilities, NotificationTray, WindowManager};
pub use types::*;
