//! Error types for the Pushgate protocol layer.

mod feed;
mod host;

pub use feed::*;
pub use host::*;
