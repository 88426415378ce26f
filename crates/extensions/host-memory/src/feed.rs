//! In-memory foreground notification feed.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use pushgate_protocols::{unread_count, FeedError, NotificationFeed, NotificationRecord};

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;

/// Notification records keyed by id, in first-seen order.
#[derive(Default)]
pub struct MemoryFeed {
    records: RwLock<Vec<NotificationRecord>>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationFeed for MemoryFeed {
    async fn replace_all(&self, incoming: Vec<NotificationRecord>) {
        let mut records = self.records.write();
        let already_read: HashSet<String> = records
            .iter()
            .filter(|r| r.is_read)
            .map(|r| r.id.clone())
            .collect();

        let mut merged: Vec<NotificationRecord> = Vec::with_capacity(incoming.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for mut record in incoming {
            // isRead only ever moves false -> true.
            record.is_read |= already_read.contains(&record.id);

            match index.get(&record.id) {
                Some(&i) => {
                    record.is_read |= merged[i].is_read;
                    merged[i] = record;
                }
                None => {
                    index.insert(record.id.clone(), merged.len());
                    merged.push(record);
                }
            }
        }

        *records = merged;
    }

    async fn records(&self) -> Vec<NotificationRecord> {
        self.records.read().clone()
    }

    async fn unread_count(&self) -> usize {
        unread_count(&self.records.read())
    }

    async fn mark_read(&self, id: &str) -> Result<(), FeedError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| FeedError::NotFound(id.to_string()))?;
        record.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> usize {
        let mut records = self.records.write();
        let mut changed = 0;
        for record in records.iter_mut().filter(|r| !r.is_read) {
            record.is_read = true;
            changed += 1;
        }
        changed
    }
}
