//! Bounded history of recently delivered push message ids.
//!
//! Deduplication is opt-in. Push services may redeliver a message, and by
//! default every delivery shows a notification. When a history is handed to
//! the [`DeliveryAgent`](crate::DeliveryAgent), pushes whose `message_id` is
//! still in the history are skipped. Pushes without a `message_id` are never
//! deduplicated.

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;

/// Fixed-capacity FIFO set of message ids.
pub struct RecentMessageIds {
    capacity: usize,
    inner: Mutex<History>,
}

#[derive(Default)]
struct History {
    order: VecDeque<String>,
    seen: HashSet<String>,
}

impl RecentMessageIds {
    /// Create a history holding at most `capacity` ids. Zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(History::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().seen.contains(id)
    }

    /// Record `id`. Returns `false` if it was already present.
    pub fn insert(&self, id: &str) -> bool {
        let mut history = self.inner.lock();
        if history.seen.contains(id) {
            return false;
        }

        if history.order.len() == self.capacity {
            if let Some(oldest) = history.order.pop_front() {
                history.seen.remove(&oldest);
            }
        }
        history.order.push_back(id.to_string());
        history.seen.insert(id.to_string());
        true
    }

    /// Forget `id`. Returns `false` if it was not present.
    pub fn remove(&self, id: &str) -> bool {
        let mut history = self.inner.lock();
        if !history.seen.remove(id) {
            return false;
        }
        history.order.retain(|seen| seen != id);
        true
    }
}
