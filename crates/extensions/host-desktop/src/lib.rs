//! # Pushgate Desktop Host
//!
//! Runs the worker against the local desktop session.
//!
//! Notifications are shown with `notify-send` on Linux and `osascript` on
//! macOS. Windows are browser tabs launched with `xdg-open` / `open` (or a
//! configured opener) against the application origin. The desktop gives no
//! handle on tabs it did not launch, so [`DesktopHost`] enumerates only the
//! windows it opened itself.

pub mod command;
pub mod host;

pub use command::{resolve_url, DesktopCommand};
pub use host::{DesktopHost, DesktopHostConfig};
