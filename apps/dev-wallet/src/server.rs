// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP server lifecycle: `Unstarted → Running → Stopped`.
//!
//! [`Server::start`] binds the listener and serves in a background task
//! until [`Server::stop`] cancels it. In-flight requests get the configured
//! grace period before the task is aborted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::router;
use crate::assets::{AssetArchive, ArchiveError};
use crate::bridge::{start_backend, BackendOptions, BridgeError};
use crate::config::Settings;
use crate::network::{NetworkConfigError, NetworkConfigSource};
use crate::state::AppState;

enum Phase {
    Unstarted,
    Running {
        local_addr: SocketAddr,
        shutdown: CancellationToken,
        task: JoinHandle<Result<(), ServerError>>,
    },
    Stopped,
}

pub struct Server {
    bind_address: String,
    shutdown_grace: Duration,
    state: AppState,
    phase: Phase,
}

impl Server {
    pub fn new(settings: &Settings, state: AppState) -> Self {
        Self {
            bind_address: settings.bind_address(),
            shutdown_grace: settings.shutdown_grace,
            state,
            phase: Phase::Unstarted,
        }
    }

    /// Bind the listener and start serving. Returns the bound address,
    /// which differs from the configured one when port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr, ServerError> {
        if !matches!(self.phase, Phase::Unstarted) {
            return Err(ServerError::AlreadyStarted);
        }

        let listener = TcpListener::bind(&self.bind_address)
            .await
            .map_err(|e| ServerError::Bind(format!("bind failed on {}: {e}", self.bind_address)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        let shutdown = CancellationToken::new();
        let app = router(self.state.clone());
        let signal = shutdown.clone().cancelled_owned();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
                .map_err(|e| ServerError::Serve(e.to_string()))
        });

        info!(addr = %local_addr, backend = %self.state.bridge.kind(), "Dev wallet listening");
        self.phase = Phase::Running {
            local_addr,
            shutdown,
            task,
        };
        Ok(local_addr)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &self.phase {
            Phase::Running { local_addr, .. } => Some(*local_addr),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Resolve when the listener exits. A shutdown-triggered exit is `Ok`.
    pub async fn wait(&mut self) -> Result<(), ServerError> {
        let Phase::Running { task, .. } = &mut self.phase else {
            return Ok(());
        };
        let result = task.await;
        self.phase = Phase::Stopped;
        flatten(result)
    }

    /// Stop serving. Repeated calls are no-ops.
    pub async fn stop(&mut self) -> Result<(), ServerError> {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running {
                shutdown, mut task, ..
            } => {
                shutdown.cancel();
                match tokio::time::timeout(self.shutdown_grace, &mut task).await {
                    Ok(result) => {
                        info!("Dev wallet stopped");
                        flatten(result)
                    }
                    Err(_) => {
                        warn!(
                            grace_secs = self.shutdown_grace.as_secs(),
                            "Grace period elapsed, aborting open connections"
                        );
                        task.abort();
                        Ok(())
                    }
                }
            }
            Phase::Unstarted | Phase::Stopped => Ok(()),
        }
    }
}

fn flatten(
    result: Result<Result<(), ServerError>, tokio::task::JoinError>,
) -> Result<(), ServerError> {
    match result {
        Ok(inner) => inner,
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(ServerError::Serve(e.to_string())),
    }
}

/// Load everything the server needs from `settings`: network config,
/// account bridge, front-end bundle and service config.
pub async fn bootstrap(settings: &Settings) -> Result<AppState, ServerError> {
    let source = NetworkConfigSource::resolve(&settings.network_config_path)?;
    let network = source.load()?;
    info!(path = %source.path().display(), network = %settings.network, "Network config loaded");

    let config = network.service_config(&settings.network, &settings.access_node)?;
    let bridge = start_backend(
        settings.backend,
        &BackendOptions {
            network,
            network_name: settings.network.clone(),
            access_node: settings.access_node.clone(),
            init_accounts: settings.init_accounts,
            upstream_timeout: settings.upstream_timeout,
        },
    )
    .await?;

    let assets = match &settings.bundle_path {
        Some(path) => AssetArchive::load(path)?,
        None => AssetArchive::embedded()?,
    };
    if assets.is_empty() {
        warn!("Front-end bundle is empty, every asset request will be answered with 404");
    } else {
        info!(entries = assets.len(), "Front-end bundle loaded");
    }

    Ok(AppState {
        bridge,
        config: Arc::new(config),
        assets: Arc::new(assets),
    })
}

/// Errors that abort startup or end serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("serve error: {0}")]
    Serve(String),

    #[error("server was already started or stopped")]
    AlreadyStarted,

    #[error(transparent)]
    NetworkConfig(#[from] NetworkConfigError),

    #[error("backend failed to start: {0}")]
    Backend(#[from] BridgeError),

    #[error("front-end bundle unusable: {0}")]
    Assets(#[from] ArchiveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{AccountBridge, BackendKind, StaticStub};
    use crate::models::{AccountDirectoryEntry, Address};

    fn settings() -> Settings {
        Settings {
            host: "127.0.0.1".into(),
            port: 0,
            shutdown_grace: Duration::from_secs(1),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn start_binds_ephemeral_port_and_stop_is_idempotent() {
        let mut server = Server::new(&settings(), AppState::default());
        assert!(server.local_addr().is_none());

        let addr = server.start().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert!(server.is_running());
        assert!(matches!(server.start().await, Err(ServerError::AlreadyStarted)));

        server.stop().await.unwrap();
        assert!(!server.is_running());
        server.stop().await.unwrap();
        server.wait().await.unwrap();
    }

    #[tokio::test]
    async fn stop_before_start_is_terminal() {
        let mut server = Server::new(&settings(), AppState::default());
        server.stop().await.unwrap();
        assert!(matches!(server.start().await, Err(ServerError::AlreadyStarted)));
    }

    #[tokio::test]
    async fn bind_conflict_is_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let settings = Settings {
            port: taken.local_addr().unwrap().port(),
            ..settings()
        };

        let mut server = Server::new(&settings, AppState::default());
        assert!(matches!(server.start().await, Err(ServerError::Bind(_))));
    }

    /// Static backend whose listing blocks for `delay` after signalling entry.
    struct SlowBridge {
        delay: Duration,
        entered: Arc<tokio::sync::Notify>,
    }

    #[async_trait::async_trait]
    impl AccountBridge for SlowBridge {
        fn kind(&self) -> BackendKind {
            BackendKind::Static
        }

        async fn list_accounts(&self) -> Vec<AccountDirectoryEntry> {
            self.entered.notify_one();
            tokio::time::sleep(self.delay).await;
            Vec::new()
        }

        async fn get_account(&self, address: &Address) -> Result<AccountDirectoryEntry, BridgeError> {
            StaticStub.get_account(address).await
        }

        async fn create_account(&self, label: &str) -> Result<AccountDirectoryEntry, BridgeError> {
            StaticStub.create_account(label).await
        }

        async fn rename_account(&self, address: &Address, label: &str) -> Result<(), BridgeError> {
            StaticStub.rename_account(address, label).await
        }

        async fn delete_account(&self, address: &Address) -> Result<(), BridgeError> {
            StaticStub.delete_account(address).await
        }
    }

    async fn slow_server(
        delay: Duration,
        grace: Duration,
    ) -> (Server, SocketAddr, Arc<tokio::sync::Notify>) {
        let entered = Arc::new(tokio::sync::Notify::new());
        let state = AppState {
            bridge: Arc::new(SlowBridge {
                delay,
                entered: entered.clone(),
            }),
            ..AppState::default()
        };
        let settings = Settings {
            shutdown_grace: grace,
            ..settings()
        };
        let mut server = Server::new(&settings, state);
        let addr = server.start().await.unwrap();
        (server, addr, entered)
    }

    #[tokio::test]
    async fn in_flight_request_finishes_within_grace_period() {
        let (mut server, addr, entered) =
            slow_server(Duration::from_millis(300), Duration::from_secs(5)).await;

        let request = tokio::spawn(reqwest::get(format!("http://{addr}/api/accounts")));
        entered.notified().await;

        server.stop().await.unwrap();
        assert!(!server.is_running());

        let response = request.await.unwrap().unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn stop_gives_up_after_grace_period() {
        let (mut server, addr, entered) =
            slow_server(Duration::from_secs(30), Duration::from_millis(200)).await;

        let _request = tokio::spawn(reqwest::get(format!("http://{addr}/api/accounts")));
        entered.notified().await;

        let stopping = tokio::time::Instant::now();
        server.stop().await.unwrap();
        let elapsed = stopping.elapsed();

        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(5));
        assert!(!server.is_running());
        server.wait().await.unwrap();
    }

    fn flow_json_in(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("flow.json");
        std::fs::write(&path, crate::network::DEFAULT_NETWORK_CONFIG).unwrap();
        path
    }

    #[tokio::test]
    async fn bootstrap_builds_harness_state() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            network_config_path: flow_json_in(&dir),
            init_accounts: 2,
            ..settings()
        };

        let state = bootstrap(&settings).await.unwrap();
        assert_eq!(state.config.flow_account_address, "0xf8d6e0586b0a20c7");
        assert_eq!(state.bridge.list_accounts().await.len(), 3);
        assert!(state.assets.resolve("/").is_some());
    }

    #[tokio::test]
    async fn bootstrap_rejects_missing_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            network_config_path: flow_json_in(&dir),
            backend: BackendKind::Static,
            bundle_path: Some(dir.path().join("nope.zip")),
            ..settings()
        };

        assert!(matches!(
            bootstrap(&settings).await,
            Err(ServerError::Assets(_))
        ));
    }
}
