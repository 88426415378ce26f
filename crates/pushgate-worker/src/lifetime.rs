//! Explicit event lifetime extension.
//!
//! A host may tear the worker down as soon as it believes an event handler
//! has returned. Handlers therefore register every piece of asynchronous work
//! on the event with [`ExtendableEvent::wait_until`], and the binding layer
//! awaits [`ExtendableEvent::settle`] before telling the host the event is
//! handled.

use std::future::Future;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::event::{EventKind, EventOutcome};

/// Pending-work handle for one event.
pub struct ExtendableEvent {
    kind: EventKind,
    pending: Vec<BoxFuture<'static, EventOutcome>>,
}

impl ExtendableEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            pending: Vec::new(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Extend the event's lifetime until `work` completes.
    pub fn wait_until<F>(&mut self, work: F)
    where
        F: Future<Output = EventOutcome> + Send + 'static,
    {
        self.pending.push(work.boxed());
    }

    /// Number of registered units of work.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drive all registered work to completion.
    ///
    /// Outcomes are returned in registration order.
    pub async fn settle(self) -> Vec<EventOutcome> {
        join_all(self.pending).await
    }
}

impl std::fmt::Debug for ExtendableEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendableEvent")
            .field("kind", &self.kind)
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::delivery::DeliveryOutcome;

    fn dropped(reason: &str) -> EventOutcome {
        EventOutcome::Delivery(DeliveryOutcome::Dropped {
            reason: reason.to_string(),
        })
    }

    #[tokio::test]
    async fn test_settle_empty() {
        let event = ExtendableEvent::new(EventKind::Push);
        assert_eq!(event.pending_count(), 0);
        assert!(event.settle().await.is_empty());
    }

    #[tokio::test]
    async fn test_settle_waits_for_all_work() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let mut event = ExtendableEvent::new(EventKind::Push);
        event.wait_until(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
            dropped("slow")
        });
        assert_eq!(event.pending_count(), 1);

        let outcomes = event.settle().await;
        assert!(finished.load(Ordering::SeqCst));
        assert_eq!(outcomes.len(), 1);
    }

    #[tokio::test]
    async fn test_settle_preserves_registration_order() {
        let mut event = ExtendableEvent::new(EventKind::Push);
        event.wait_until(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            dropped("first")
        });
        event.wait_until(async { dropped("second") });

        let outcomes = event.settle().await;
        let reasons: Vec<String> = outcomes
            .into_iter()
            .map(|o| match o {
                EventOutcome::Delivery(DeliveryOutcome::Dropped { reason }) => reason,
                other => panic!("unexpected outcome: {:?}", other),
            })
            .collect();
        assert_eq!(reasons, vec!["first", "second"]);
    }

    #[test]
    fn test_debug_shows_pending_count() {
        let mut event = ExtendableEvent::new(EventKind::NotificationClick);
        event.wait_until(async { dropped("x") });
        let debug = format!("{:?}", event);
        assert!(debug.contains("NotificationClick"));
        assert!(debug.contains("pending: 1"));
    }
}
