//! The worker: event entry points wiring the handlers to extendable events.

use std::sync::Arc;

use tracing::debug;

use pushgate_protocols::{HostCapabilities, PushPayload};

use crate::dedupe::RecentMessageIds;
use crate::delivery::{DeliveryAgent, NotificationDefaults};
use crate::event::{EventOutcome, NotificationClick, WorkerEvent};
use crate::lifetime::ExtendableEvent;
use crate::metrics::WorkerMetrics;
use crate::router::ClickRouter;

/// Push and click handlers bound to one host.
///
/// Cloning is cheap; clones share capabilities and metrics but no
/// per-event state.
#[derive(Clone)]
pub struct ServiceWorker {
    agent: DeliveryAgent,
    router: ClickRouter,
    metrics: Arc<WorkerMetrics>,
}

impl ServiceWorker {
    pub fn new(host: HostCapabilities, defaults: NotificationDefaults) -> Self {
        let metrics = Arc::new(WorkerMetrics::new());
        let router = ClickRouter::new(host.clone(), defaults.click_action.clone())
            .with_metrics(metrics.clone());
        let agent = DeliveryAgent::new(host.tray, defaults).with_metrics(metrics.clone());

        Self {
            agent,
            router,
            metrics,
        }
    }

    /// Drop pushes whose message id is still in `history`.
    pub fn with_history(mut self, history: Arc<RecentMessageIds>) -> Self {
        self.agent = self.agent.with_history(history);
        self
    }

    pub fn metrics(&self) -> Arc<WorkerMetrics> {
        self.metrics.clone()
    }

    /// Register delivery of `payload` on `event`.
    pub fn on_push(&self, event: &mut ExtendableEvent, payload: PushPayload) {
        let agent = self.agent.clone();
        event.wait_until(async move { EventOutcome::Delivery(agent.deliver(payload).await) });
    }

    /// Register routing of `click` on `event`.
    pub fn on_notification_click(&self, event: &mut ExtendableEvent, click: NotificationClick) {
        let router = self.router.clone();
        event.wait_until(async move { EventOutcome::Route(router.route(click).await) });
    }

    /// Build the extendable event for `worker_event` with its work registered.
    pub fn handle(&self, worker_event: WorkerEvent) -> ExtendableEvent {
        let mut event = ExtendableEvent::new(worker_event.kind());
        match worker_event {
            WorkerEvent::Push { payload } => self.on_push(&mut event, payload),
            WorkerEvent::NotificationClick { click } => {
                self.on_notification_click(&mut event, click)
            }
        }
        debug!(kind = %event.kind(), pending = event.pending_count(), "Event handled");
        event
    }
}
