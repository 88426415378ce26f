//! Error types for the worker.

use thiserror::Error;

/// Errors surfaced to whoever submits events to the worker.
///
/// Handler-level failures (display refused, window gone) are outcomes,
/// not errors: they are logged and reported in the [`EventAck`](crate::EventAck).
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The dispatcher stopped accepting events.
    #[error("Event queue closed")]
    QueueClosed,

    /// The dispatcher dropped the event before acknowledging it.
    #[error("Event acknowledgment dropped")]
    AckDropped,
}

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_closed_display() {
        assert_eq!(WorkerError::QueueClosed.to_string(), "Event queue closed");
    }

    #[test]
    fn test_ack_dropped_display() {
        assert_eq!(
            WorkerError::AckDropped.to_string(),
            "Event acknowledgment dropped"
        );
    }
}
