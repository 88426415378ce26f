//! Event dispatcher: the binding between the host's event delivery and the
//! worker's handlers.
//!
//! Every event becomes its own task, so distinct pushes are processed
//! concurrently and complete in no particular order. The submitter's
//! acknowledgment is sent only after the event's [`ExtendableEvent`] has
//! settled.
//!
//! [`ExtendableEvent`]: crate::ExtendableEvent

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, Instrument};
use uuid::Uuid;

use crate::error::{WorkerError, WorkerResult};
use crate::event::{EventKind, EventOutcome, WorkerEvent};
use crate::metrics::{MetricsSnapshot, WorkerMetrics};
use crate::worker::ServiceWorker;

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

/// Completion signal for one event.
#[derive(Debug, Clone, Serialize)]
pub struct EventAck {
    pub event_id: Uuid,
    pub kind: EventKind,
    pub outcomes: Vec<EventOutcome>,
    pub acked_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

struct Envelope {
    id: Uuid,
    event: WorkerEvent,
    ack: oneshot::Sender<EventAck>,
}

/// Cloneable submission side of the dispatcher.
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: mpsc::Sender<Envelope>,
    metrics: Arc<WorkerMetrics>,
}

impl DispatcherHandle {
    /// Submit an event and wait until its pending work has settled.
    pub async fn dispatch(&self, event: WorkerEvent) -> WorkerResult<EventAck> {
        let ack = self.submit(event).await?;
        ack.await.map_err(|_| WorkerError::AckDropped)
    }

    /// Submit an event, returning a receiver for its acknowledgment.
    ///
    /// Dropping the receiver does not cancel the event.
    pub async fn submit(&self, event: WorkerEvent) -> WorkerResult<oneshot::Receiver<EventAck>> {
        let (ack, rx) = oneshot::channel();
        let envelope = Envelope {
            id: Uuid::new_v4(),
            event,
            ack,
        };
        self.tx
            .send(envelope)
            .await
            .map_err(|_| WorkerError::QueueClosed)?;
        Ok(rx)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receives events and runs each through the worker.
pub struct EventDispatcher {
    worker: ServiceWorker,
    rx: mpsc::Receiver<Envelope>,
    cancel: CancellationToken,
}

impl EventDispatcher {
    /// Create a dispatcher with a queue of `capacity` events.
    pub fn new(worker: ServiceWorker, capacity: usize) -> (Self, DispatcherHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = DispatcherHandle {
            tx,
            metrics: worker.metrics(),
        };
        let dispatcher = Self {
            worker,
            rx,
            cancel: CancellationToken::new(),
        };
        (dispatcher, handle)
    }

    /// Stop when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until cancelled or until every handle is dropped.
    ///
    /// On stop, events already queued are still handled and every in-flight
    /// event is settled and acknowledged before this returns.
    pub async fn run(mut self) {
        let worker = self.worker.clone();
        let cancel = self.cancel.clone();
        worker.metrics().mark_start();
        info!("Event dispatcher started");

        let mut tasks = JoinSet::new();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Event dispatcher cancelled");
                    break;
                }
                envelope = self.rx.recv() => match envelope {
                    Some(envelope) => spawn_event(&mut tasks, &worker, envelope),
                    None => {
                        debug!("All dispatcher handles dropped");
                        break;
                    }
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    log_join(joined);
                }
            }
        }

        // The host already delivered anything still queued.
        self.rx.close();
        while let Some(envelope) = self.rx.recv().await {
            spawn_event(&mut tasks, &worker, envelope);
        }
        while let Some(joined) = tasks.join_next().await {
            log_join(joined);
        }

        info!(
            events_acked = worker.metrics().snapshot().events_acked,
            "Event dispatcher stopped"
        );
    }
}

fn spawn_event(tasks: &mut JoinSet<()>, worker: &ServiceWorker, envelope: Envelope) {
    let Envelope { id, event, ack } = envelope;
    let kind = event.kind();
    let metrics = worker.metrics();
    let worker = worker.clone();

    let span = tracing::info_span!("worker_event", event_id = %id, kind = %kind);
    metrics.event_started();

    tasks.spawn(
        async move {
            let started = Instant::now();
            let outcomes = worker.handle(event).settle().await;
            metrics.event_acked();

            let elapsed_ms = started.elapsed().as_millis() as u64;
            debug!(elapsed_ms, outcomes = outcomes.len(), "Event settled");

            let sent = ack.send(EventAck {
                event_id: id,
                kind,
                outcomes,
                acked_at: Utc::now(),
                elapsed_ms,
            });
            if sent.is_err() {
                debug!("Submitter stopped waiting for acknowledgment");
            }
        }
        .instrument(span),
    );
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Event task failed");
    }
}
