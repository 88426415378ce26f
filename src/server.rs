//! Server initialization and startup logic for Pushgate.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pushgate_channel_web::{WebBridge, WebBridgeConfig, WebBridgeState};
use pushgate_config::{
    Config, ConfigLoader, ConfigValidator, HostConfig, HostKind, LoggingConfig,
    NotificationConfig,
};
use pushgate_host_desktop::{DesktopHost, DesktopHostConfig};
use pushgate_host_memory::{MemoryFeed, MemoryHost};
use pushgate_protocols::HostCapabilities;
use pushgate_worker::{
    CancellationToken, EventDispatcher, NotificationDefaults, RecentMessageIds, ServiceWorker,
};

/// Initialize tracing with console and file output.
///
/// Log files are written to the configured directory with daily rotation.
pub(crate) fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::expand_path(&config.dir.to_string_lossy());
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pushgate")
        .filename_suffix("log")
        .max_log_files(config.max_files)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer (human-readable text format with colors)
        .with(fmt::layer().with_target(true).with_ansi(true))
        // File layer (text format without colors)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Fallback values applied to pushes with missing fields.
pub(crate) fn notification_defaults(config: &NotificationConfig) -> NotificationDefaults {
    NotificationDefaults {
        title: config.fallback_title.clone(),
        body: config.fallback_body.clone(),
        click_action: config.default_click_action.clone(),
        icon: config.icon.clone(),
    }
}

pub(crate) fn desktop_host(config: &HostConfig) -> Arc<DesktopHost> {
    Arc::new(DesktopHost::new(DesktopHostConfig {
        app_origin: config.app_origin.clone(),
        open_command: config.open_command.clone(),
    }))
}

fn build_host(config: &HostConfig) -> HostCapabilities {
    match config.kind {
        HostKind::Memory => HostCapabilities::from_host(Arc::new(MemoryHost::new())),
        HostKind::Desktop => HostCapabilities::from_host(desktop_host(config)),
    }
}

/// Build the worker described by `config`.
pub(crate) fn build_worker(config: &Config, host: HostCapabilities) -> ServiceWorker {
    let worker = ServiceWorker::new(host, notification_defaults(&config.notification));
    if config.worker.dedupe_capacity > 0 {
        worker.with_history(Arc::new(RecentMessageIds::new(config.worker.dedupe_capacity)))
    } else {
        worker
    }
}

/// Run the worker and HTTP bridge in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Pushgate v{}", env!("CARGO_PKG_VERSION"));

    let validation = ConfigValidator::validate(&config)?;
    for warning in &validation.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    for e in &validation.errors {
        error!("Config error at {}: {}", e.path, e.message);
    }
    validation.ensure_valid()?;

    let shutdown = CancellationToken::new();

    let host = build_host(&config.host);
    info!(kind = ?config.host.kind, "Host initialized");

    let worker = build_worker(&config, host.clone());
    let (dispatcher, handle) = EventDispatcher::new(worker, config.worker.queue_capacity);
    let dispatcher = dispatcher.with_cancellation(shutdown.clone());
    let dispatcher_task = tokio::spawn(dispatcher.run());

    let state = WebBridgeState::new(handle, host.tray.clone(), Arc::new(MemoryFeed::new()));
    let bridge = WebBridge::new(
        WebBridgeConfig {
            host: config.server.host.clone(),
            port: config.server.port,
        },
        state,
    )
    .with_shutdown(shutdown.clone());
    let (addr, serving) = bridge.start().await?;

    info!("Pushgate ready:");
    info!("  HTTP Bridge:   http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /push                          - deliver a push payload");
    info!("  GET  /tray                          - displayed notifications");
    info!("  POST /tray/{{id}}/click               - click a notification");
    info!("  GET  /api/notifications             - notification feed");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    shutdown.cancel();
    serving.await?;
    dispatcher_task.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults_from_config() {
        let defaults = notification_defaults(&NotificationConfig::default());
        assert_eq!(defaults, NotificationDefaults::default());
    }

    #[tokio::test]
    async fn test_build_worker_with_history() {
        let mut config = Config::default();
        config.worker.dedupe_capacity = 4;

        let host = Arc::new(MemoryHost::new());
        let worker = build_worker(&config, HostCapabilities::from_host(host.clone()));

        let payload = pushgate_protocols::PushPayload::default().with_message_id("m-1");
        for _ in 0..2 {
            worker
                .handle(pushgate_worker::WorkerEvent::push(payload.clone()))
                .settle()
                .await;
        }
        assert_eq!(host.displayed_count(), 1);
    }
}
