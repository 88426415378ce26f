//! Shared data types.

mod notification;
mod payload;
mod record;
mod window;

pub use notification::*;
pub use payload::*;
pub use record::*;
pub use window::*;
