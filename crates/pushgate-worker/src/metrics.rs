//! Worker metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters shared by the handlers and the dispatcher.
#[derive(Debug, Default)]
pub struct WorkerMetrics {
    /// Push events received.
    pub pushes_received: AtomicU64,

    /// Notifications the tray accepted.
    pub notifications_shown: AtomicU64,

    /// Pushes whose notification the tray refused.
    pub deliveries_dropped: AtomicU64,

    /// Pushes skipped by the message-id history.
    pub duplicates_skipped: AtomicU64,

    /// Click events received.
    pub clicks_received: AtomicU64,

    /// Clicks resolved by focusing an existing window.
    pub windows_focused: AtomicU64,

    /// Clicks resolved by opening a new window.
    pub windows_opened: AtomicU64,

    /// Clicks where focus or open failed.
    pub routing_failures: AtomicU64,

    /// Tray close requests that failed.
    pub close_failures: AtomicU64,

    /// Events whose pending work has not settled yet.
    pub events_in_flight: AtomicU64,

    /// Events acknowledged after settling.
    pub events_acked: AtomicU64,

    start_time: parking_lot::RwLock<Option<Instant>>,
}

impl WorkerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of the dispatcher.
    pub fn mark_start(&self) {
        *self.start_time.write() = Some(Instant::now());
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time
            .read()
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0)
    }

    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn event_started(&self) {
        self.events_in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn event_acked(&self) {
        self.events_in_flight.fetch_sub(1, Ordering::Relaxed);
        self.events_acked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            uptime_secs: self.uptime_secs(),
            pushes_received: self.pushes_received.load(Ordering::Relaxed),
            notifications_shown: self.notifications_shown.load(Ordering::Relaxed),
            deliveries_dropped: self.deliveries_dropped.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
            clicks_received: self.clicks_received.load(Ordering::Relaxed),
            windows_focused: self.windows_focused.load(Ordering::Relaxed),
            windows_opened: self.windows_opened.load(Ordering::Relaxed),
            routing_failures: self.routing_failures.load(Ordering::Relaxed),
            close_failures: self.close_failures.load(Ordering::Relaxed),
            events_in_flight: self.events_in_flight.load(Ordering::Relaxed),
            events_acked: self.events_acked.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`WorkerMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: u64,
    pub pushes_received: u64,
    pub notifications_shown: u64,
    pub deliveries_dropped: u64,
    pub duplicates_skipped: u64,
    pub clicks_received: u64,
    pub windows_focused: u64,
    pub windows_opened: u64,
    pub routing_failures: u64,
    pub close_failures: u64,
    pub events_in_flight: u64,
    pub events_acked: u64,
}

impl MetricsSnapshot {
    /// Share of pushes that ended up in the tray.
    pub fn delivery_rate(&self) -> f64 {
        if self.pushes_received == 0 {
            return 0.0;
        }
        self.notifications_shown as f64 / self.pushes_received as f64
    }
}
