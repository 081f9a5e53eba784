//! Server startup and binding

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use pulse::Pulse;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::metrics::MetricsObserver;
use crate::routes::{self, AppState};

/// Build the engine described by `config`, reporting to the metrics recorder.
pub fn build_pulse(config: &ServerConfig) -> anyhow::Result<Pulse> {
    let connectors =
        pulse_providers::build_connectors(&config.providers, config.engine.provider_timeout)?;
    let pulse = Pulse::builder()
        .config(config.engine.clone())
        .with_connectors(connectors)
        .with_observer(Arc::new(MetricsObserver))
        .build()?;
    Ok(pulse)
}

/// Server instance that can be started
pub struct Server {
    config: Arc<ServerConfig>,
    router: Router,
}

impl Server {
    /// Create a server around an already built engine.
    pub fn new(config: ServerConfig, pulse: Pulse, metrics: Option<PrometheusHandle>) -> Self {
        let config = Arc::new(config);
        let state = AppState::new(Arc::new(pulse), config.clone(), metrics);
        let router = routes::build_router(state);

        Self { config, router }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind to the configured host/port and serve until Ctrl-C.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr: SocketAddr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.run_with_listener(listener).await
    }

    /// Serve on an existing listener, e.g. one bound to port 0 in tests.
    pub async fn run_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
