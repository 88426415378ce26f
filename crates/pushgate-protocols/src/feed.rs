//! Foreground notification feed boundary.
//!
//! The page-side store of notification history. The worker never writes
//! into it; it is kept consistent only by re-fetching from the backend, so
//! it may briefly disagree with the host tray.

use async_trait::async_trait;

use crate::error::FeedError;
use crate::types::NotificationRecord;

#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Replace the feed with a fresh backend snapshot.
    ///
    /// Records are keyed by `id`: first appearance fixes display order, the
    /// last write per id wins, and a record already read stays read.
    async fn replace_all(&self, records: Vec<NotificationRecord>);

    /// All records in display order.
    async fn records(&self) -> Vec<NotificationRecord>;

    /// Number of unread records.
    async fn unread_count(&self) -> usize;

    /// Mark one record read. Marking an already-read record is a no-op.
    async fn mark_read(&self, id: &str) -> Result<(), FeedError>;

    /// Mark every record read, returning how many changed.
    async fn mark_all_read(&self) -> usize;
}
