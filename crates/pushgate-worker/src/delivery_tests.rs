use super::*;
use std::sync::atomic::Ordering;

use pushgate_host_memory::MemoryHost;
use serde_json::json;

fn agent(host: &Arc<MemoryHost>) -> DeliveryAgent {
    DeliveryAgent::new(host.clone(), NotificationDefaults::default())
}

#[test]
fn test_resolve_all_fields_present() {
    let payload = PushPayload::from_data(json!({
        "title": "T",
        "body": "B",
        "click_action": "/x"
    }));
    let content = resolve_content(&payload, &NotificationDefaults::default());
    assert_eq!(content.title, "T");
    assert_eq!(content.body, "B");
    assert_eq!(content.data.click_action.as_deref(), Some("/x"));
    assert_eq!(content.icon, "/logo192.png");
}

#[test]
fn test_resolve_all_fields_missing() {
    let content = resolve_content(&PushPayload::default(), &NotificationDefaults::default());
    assert_eq!(content.title, "알림");
    assert_eq!(content.body, "내용이 없습니다");
    assert_eq!(content.data.click_action.as_deref(), Some("/"));
}

#[test]
fn test_resolve_each_field_falls_back_independently() {
    let defaults = NotificationDefaults::default();

    let only_title = PushPayload::from_data(json!({"title": "Sale"}));
    let content = resolve_content(&only_title, &defaults);
    assert_eq!(content.title, "Sale");
    assert_eq!(content.body, defaults.body);
    assert_eq!(content.data.click_action.as_deref(), Some("/"));

    let only_link = PushPayload::from_data(json!({"click_action": "/item/5"}));
    let content = resolve_content(&only_link, &defaults);
    assert_eq!(content.title, defaults.title);
    assert_eq!(content.data.click_action.as_deref(), Some("/item/5"));
}

#[test]
fn test_resolve_ignores_non_string_values() {
    let payload = PushPayload::from_data(json!({"title": 7, "body": ["a"], "click_action": null}));
    let content = resolve_content(&payload, &NotificationDefaults::default());
    assert_eq!(content.title, "알림");
    assert_eq!(content.body, "내용이 없습니다");
    assert_eq!(content.data.click_action.as_deref(), Some("/"));
}

#[test]
fn test_resolve_uses_custom_defaults() {
    let defaults = NotificationDefaults {
        title: "Notice".to_string(),
        body: "No content".to_string(),
        click_action: "/inbox".to_string(),
        icon: "/bell.png".to_string(),
    };
    let content = resolve_content(&PushPayload::default(), &defaults);
    assert_eq!(content.title, "Notice");
    assert_eq!(content.body, "No content");
    assert_eq!(content.data.click_action.as_deref(), Some("/inbox"));
    assert_eq!(content.icon, "/bell.png");
}

#[test]
fn test_resolve_is_deterministic() {
    let payload = PushPayload::from_data(json!({"title": "T", "body": "B", "click_action": "/x"}));
    let defaults = NotificationDefaults::default();
    let first = resolve_content(&payload, &defaults);
    for _ in 0..5 {
        assert_eq!(resolve_content(&payload, &defaults), first);
    }
}

#[tokio::test]
async fn test_deliver_shows_one_notification() {
    let host = Arc::new(MemoryHost::new());
    let payload = PushPayload::from_data(json!({"title": "T", "body": "B", "click_action": "/x"}));

    let outcome = agent(&host).deliver(payload).await;

    let notification = match outcome {
        DeliveryOutcome::Shown { notification } => notification,
        other => panic!("expected Shown, got {:?}", other),
    };
    assert_eq!(notification.content.title, "T");
    assert_eq!(notification.click_action(), Some("/x"));
    assert_eq!(host.displayed_count(), 1);
    assert_eq!(host.calls().show, 1);
}

#[tokio::test]
async fn test_deliver_missing_fields_still_shows() {
    let host = Arc::new(MemoryHost::new());
    let outcome = agent(&host).deliver(PushPayload::default()).await;
    assert!(outcome.is_shown());

    let shown = host.displayed_snapshot();
    assert_eq!(shown[0].content.title, "알림");
    assert_eq!(shown[0].content.body, "내용이 없습니다");
    assert_eq!(shown[0].click_action(), Some("/"));
}

#[tokio::test]
async fn test_deliver_display_failure_not_retried() {
    let host = Arc::new(MemoryHost::new());
    host.deny_permission(true);
    let metrics = Arc::new(WorkerMetrics::new());
    let agent = agent(&host).with_metrics(metrics.clone());

    let outcome = agent.deliver(PushPayload::default()).await;

    assert!(matches!(outcome, DeliveryOutcome::Dropped { .. }));
    assert_eq!(host.calls().show, 1);
    assert_eq!(host.displayed_count(), 0);
    assert_eq!(metrics.deliveries_dropped.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_deliver_duplicates_without_history() {
    let host = Arc::new(MemoryHost::new());
    let agent = agent(&host);
    let payload = PushPayload::from_data(json!({"title": "T"})).with_message_id("m-1");

    agent.deliver(payload.clone()).await;
    agent.deliver(payload).await;

    assert_eq!(host.displayed_count(), 2);
}

#[tokio::test]
async fn test_deliver_with_history_skips_repeat() {
    let host = Arc::new(MemoryHost::new());
    let metrics = Arc::new(WorkerMetrics::new());
    let agent = agent(&host)
        .with_history(Arc::new(RecentMessageIds::new(8)))
        .with_metrics(metrics.clone());
    let payload = PushPayload::from_data(json!({"title": "T"})).with_message_id("m-1");

    assert!(agent.deliver(payload.clone()).await.is_shown());
    let second = agent.deliver(payload).await;

    assert!(matches!(second, DeliveryOutcome::Duplicate { ref message_id } if message_id == "m-1"));
    assert_eq!(host.displayed_count(), 1);
    assert_eq!(metrics.duplicates_skipped.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_deliver_with_history_ignores_missing_message_id() {
    let host = Arc::new(MemoryHost::new());
    let agent = agent(&host).with_history(Arc::new(RecentMessageIds::new(8)));

    agent.deliver(PushPayload::default()).await;
    agent.deliver(PushPayload::default()).await;

    assert_eq!(host.displayed_count(), 2);
}

#[tokio::test]
async fn test_deliver_with_history_retries_after_failed_display() {
    let host = Arc::new(MemoryHost::new());
    let history = Arc::new(RecentMessageIds::new(8));
    let agent = agent(&host).with_history(history.clone());
    let payload = PushPayload::default().with_message_id("m-1");

    host.deny_permission(true);
    let first = agent.deliver(payload.clone()).await;
    assert!(matches!(first, DeliveryOutcome::Dropped { .. }));
    assert!(!history.contains("m-1"));

    host.deny_permission(false);
    let second = agent.deliver(payload.clone()).await;
    assert!(second.is_shown());
    assert_eq!(host.displayed_count(), 1);

    // Once shown, the id is remembered again.
    assert!(matches!(
        agent.deliver(payload).await,
        DeliveryOutcome::Duplicate { .. }
    ));
}
