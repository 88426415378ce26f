//! # Pushgate Host - Memory
//!
//! In-process implementations of the host capabilities.
//!
//! - [`MemoryHost`]: a notification tray and window manager that keep their
//!   state in memory and record every call, used as the test double for the
//!   worker and as the simulated host behind the HTTP bridge.
//! - [`MemoryFeed`]: the foreground notification list.

mod feed;
mod host;

pub use feed::MemoryFeed;
pub use host::{HostCalls, MemoryHost};
