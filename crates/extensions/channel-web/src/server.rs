//! HTTP server and routing.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use pushgate_protocols::{
    unread_count, DisplayedNotification, NotificationId, NotificationRecord, PushPayload,
};
use pushgate_worker::{EventAck, WorkerEvent};

use crate::{ApiError, WebBridgeState};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Create the Axum router for the bridge.
pub fn create_router(state: Arc<WebBridgeState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Push service side
        .route("/push", post(receive_push))
        // Host tray
        .route("/tray", get(list_tray))
        .route("/tray/{id}/click", post(click_notification))
        // Foreground feed
        .route("/api/notifications", get(get_feed).put(replace_feed))
        .route("/api/notifications/read-all", post(mark_all_read))
        .route("/api/notifications/{id}/read", post(mark_read))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<WebBridgeState>>) -> impl IntoResponse {
    let status = if state.dispatcher.is_closed() {
        "stopping"
    } else if state.started.load(Ordering::SeqCst) {
        "ok"
    } else {
        "starting"
    };

    Json(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "metrics": state.dispatcher.metrics(),
    }))
}

/// Deliver one push payload and wait for its acknowledgment.
async fn receive_push(
    State(state): State<Arc<WebBridgeState>>,
    Json(payload): Json<PushPayload>,
) -> Result<Json<EventAck>, ApiError> {
    debug!(message_id = ?payload.message_id, "Push received over HTTP");
    let ack = state.dispatcher.dispatch(WorkerEvent::push(payload)).await?;
    Ok(Json(ack))
}

async fn list_tray(State(state): State<Arc<WebBridgeState>>) -> Json<Vec<DisplayedNotification>> {
    Json(state.tray.displayed().await)
}

/// Simulate the user clicking a displayed notification.
async fn click_notification(
    State(state): State<Arc<WebBridgeState>>,
    Path(id): Path<String>,
) -> Result<Json<EventAck>, ApiError> {
    let notification = state
        .tray
        .get(&NotificationId::new(id.as_str()))
        .await
        .ok_or(ApiError::NotFound(id))?;

    let ack = state
        .dispatcher
        .dispatch(WorkerEvent::click(notification))
        .await?;
    Ok(Json(ack))
}

/// Feed view returned by every feed route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedView {
    notifications: Vec<NotificationRecord>,
    unread_count: usize,
}

impl FeedView {
    fn new(notifications: Vec<NotificationRecord>) -> Self {
        let unread_count = unread_count(&notifications);
        Self {
            notifications,
            unread_count,
        }
    }
}

async fn feed_view(state: &WebBridgeState) -> Json<FeedView> {
    Json(FeedView::new(state.feed.records().await))
}

async fn get_feed(State(state): State<Arc<WebBridgeState>>) -> Json<FeedView> {
    feed_view(&state).await
}

/// Load a fresh backend snapshot into the feed.
async fn replace_feed(
    State(state): State<Arc<WebBridgeState>>,
    Json(records): Json<Vec<NotificationRecord>>,
) -> Json<FeedView> {
    debug!(records = records.len(), "Replacing notification feed");
    state.feed.replace_all(records).await;
    feed_view(&state).await
}

async fn mark_read(
    State(state): State<Arc<WebBridgeState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedView>, ApiError> {
    state.feed.mark_read(&id).await?;
    Ok(feed_view(&state).await)
}

async fn mark_all_read(State(state): State<Arc<WebBridgeState>>) -> impl IntoResponse {
    let updated = state.feed.mark_all_read().await;
    debug!(updated, "Marked all notifications read");
    (StatusCode::OK, feed_view(&state).await)
}
