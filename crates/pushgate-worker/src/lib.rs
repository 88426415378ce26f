//! # Pushgate Worker
//!
//! The detached background context of the Pushgate push pipeline.
//!
//! Two stateless handlers live here:
//!
//! - [`DeliveryAgent`]: turns every inbound [`PushPayload`] into exactly one
//!   host notification, substituting fallback text for missing fields.
//! - [`ClickRouter`]: on notification click, closes the notification and
//!   focuses the first open window whose URL equals the click target, or
//!   opens a new window when none matches.
//!
//! Neither handler keeps state between events. The host environment comes in
//! through [`HostCapabilities`], and the lifetime of each event's asynchronous
//! work is made explicit with an [`ExtendableEvent`] that the
//! [`EventDispatcher`] settles before acknowledging the event.
//!
//! ```text
//!  push service ──► DispatcherHandle ──► EventDispatcher ──► ServiceWorker
//!                          ▲                   │ (one task per event)
//!                          └──── EventAck ◄────┘ after ExtendableEvent::settle
//! ```
//!
//! [`PushPayload`]: pushgate_protocols::PushPayload
//! [`HostCapabilities`]: pushgate_protocols::HostCapabilities

pub mod dedupe;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod lifetime;
pub mod metrics;
pub mod router;
pub mod worker;

pub use dedupe::RecentMessageIds;
pub use delivery::{resolve_content, DeliveryAgent, DeliveryOutcome, NotificationDefaults};
pub use dispatcher::{DispatcherHandle, EventAck, EventDispatcher};
pub use error::{WorkerError, WorkerResult};
pub use event::{EventKind, EventOutcome, NotificationClick, WorkerEvent};
pub use lifetime::ExtendableEvent;
pub use metrics::{MetricsSnapshot, WorkerMetrics};
pub use router::{ClickRouter, RouteOutcome};
pub use worker::ServiceWorker;

// Re-export CancellationToken for convenience
pub use tokio_util::sync::CancellationToken;
