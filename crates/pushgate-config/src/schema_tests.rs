use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.host.kind, HostKind::Memory);
    assert_eq!(config.worker.dedupe_capacity, 0);
}

#[test]
fn test_notification_config_default() {
    let config = NotificationConfig::default();
    assert_eq!(config.fallback_title, "알림");
    assert_eq!(config.fallback_body, "내용이 없습니다");
    assert_eq!(config.default_click_action, "/");
    assert_eq!(config.icon, "/logo192.png");
}

#[test]
fn test_worker_config_default() {
    let config = WorkerConfig::default();
    assert_eq!(config.queue_capacity, 256);
}

#[test]
fn test_host_kind_serialization() {
    let json = toml::to_string(&HostConfig {
        kind: HostKind::Desktop,
        ..Default::default()
    })
    .unwrap();
    assert!(json.contains("kind = \"desktop\""));
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, "info");
    assert_eq!(config.max_files, 30);
    assert!(config.dir.ends_with("logs"));
}

#[test]
fn test_config_toml_round_trip_keeps_fallbacks() {
    let original = Config::default();
    let text = toml::to_string(&original).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed.notification.fallback_title, original.notification.fallback_title);
    assert_eq!(parsed.host.app_origin, original.host.app_origin);
}
