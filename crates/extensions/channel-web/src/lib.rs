//! # Pushgate Channel - Web
//!
//! HTTP bridge in front of the worker.
//!
//! This channel:
//! - Accepts push payloads and feeds them to the event dispatcher
//! - Lists the host tray and turns tray clicks into click events
//! - Serves the foreground notification feed to pages
//!
//! ## Usage
//!
//! ```ignore
//! use pushgate_channel_web::{WebBridge, WebBridgeConfig, WebBridgeState};
//!
//! let state = WebBridgeState::new(dispatcher, tray, feed);
//! let bridge = WebBridge::new(WebBridgeConfig::default(), state);
//! let (addr, serving) = bridge.start().await?;
//! bridge.stop();
//! serving.await?;
//! ```

mod error;
mod server;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use pushgate_protocols::{NotificationFeed, NotificationTray};
use pushgate_worker::{CancellationToken, DispatcherHandle};

pub use error::{ApiError, BridgeError};
pub use server::create_router;

/// Web bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebBridgeConfig {
    /// Host to bind to (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on (default: 8080).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for WebBridgeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// State shared across handlers.
pub struct WebBridgeState {
    /// Submission side of the event dispatcher.
    pub dispatcher: DispatcherHandle,
    /// Tray the worker shows notifications in.
    pub tray: Arc<dyn NotificationTray>,
    /// Foreground notification feed.
    pub feed: Arc<dyn NotificationFeed>,
    /// Server started flag.
    pub started: AtomicBool,
}

impl WebBridgeState {
    pub fn new(
        dispatcher: DispatcherHandle,
        tray: Arc<dyn NotificationTray>,
        feed: Arc<dyn NotificationFeed>,
    ) -> Self {
        Self {
            dispatcher,
            tray,
            feed,
            started: AtomicBool::new(false),
        }
    }
}

/// HTTP bridge server.
pub struct WebBridge {
    config: WebBridgeConfig,
    state: Arc<WebBridgeState>,
    shutdown: CancellationToken,
}

impl WebBridge {
    pub fn new(config: WebBridgeConfig, state: WebBridgeState) -> Self {
        Self {
            config,
            state: Arc::new(state),
            shutdown: CancellationToken::new(),
        }
    }

    /// Stop serving when `token` is cancelled.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Get the bridge's listen address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub fn state(&self) -> Arc<WebBridgeState> {
        self.state.clone()
    }

    pub fn is_started(&self) -> bool {
        self.state.started.load(Ordering::SeqCst)
    }

    /// Bind and serve in the background.
    ///
    /// Returns the bound address and the serve task, which completes once
    /// shutdown is requested and in-flight requests have finished.
    pub async fn start(&self) -> Result<(SocketAddr, JoinHandle<()>), BridgeError> {
        let addr = self.address();
        let listener_addr: SocketAddr = addr
            .parse()
            .map_err(|e| BridgeError::InvalidAddress(format!("{}: {}", addr, e)))?;

        let listener = tokio::net::TcpListener::bind(listener_addr)
            .await
            .map_err(|e| BridgeError::Bind(format!("{}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        let router = create_router(self.state.clone());
        let shutdown = self.shutdown.clone();
        let state = self.state.clone();

        info!("Web bridge started at http://{}", local_addr);
        self.state.started.store(true, Ordering::SeqCst);

        let serving = tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await;
            if let Err(e) = result {
                tracing::error!("Web server error: {}", e);
            }
            state.started.store(false, Ordering::SeqCst);
            debug!("Web bridge stopped");
        });

        Ok((local_addr, serving))
    }

    /// Ask the server to finish in-flight requests and stop.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }
}
