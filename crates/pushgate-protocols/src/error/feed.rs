//! Foreground feed errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Notification record not found: {0}")]
    NotFound(String),
}
