//! HTTP server for the PTI calculation, health and Prometheus endpoints
//!
//! This module wires the handlers into an Axum router and runs it with
//! graceful shutdown.

use crate::api::handlers::{
    calculate_pti_handler, health_handler, metrics_handler, ready_handler, root_handler,
};
use crate::config::AppConfig;
use crate::metrics::MetricsCollector;
use crate::rating::{AdjustmentCalculator, PtiCalculator};
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl From<&AppConfig> for ApiServerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            port: config.service.http_port,
            host: config.service.http_host.clone(),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub calculator: Arc<dyn AdjustmentCalculator>,
    pub metrics: Arc<MetricsCollector>,
    pub service_name: String,
}

impl ApiState {
    pub fn new(
        calculator: Arc<dyn AdjustmentCalculator>,
        metrics: Arc<MetricsCollector>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            calculator,
            metrics,
            service_name: service_name.into(),
        }
    }

    /// Build the production state from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let calculator = PtiCalculator::new(config.rating.clone())?;
        let metrics = MetricsCollector::new()?;

        Ok(Self::new(
            Arc::new(calculator),
            Arc::new(metrics),
            config.service.name.clone(),
        ))
    }
}

/// API server that provides the calculation and monitoring endpoints
pub struct ApiServer {
    config: ApiServerConfig,
    state: ApiState,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, state: ApiState) -> Self {
        // The flag is latched, so a stop that lands before `start` still counts
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            state,
            shutdown_tx,
        }
    }

    /// Start the server and serve until `stop` is called
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid API server address")?;

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let app = self.create_router();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind API server to {}", addr))?;

        info!("API server listening on http://{}", addr);

        // Serve with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
                info!("API server shutdown signal received");
            })
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Create the Axum router with all endpoints
    pub fn create_router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/api/calculate-pti", post(calculate_pti_handler))
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(self.state.clone())
    }

    /// Stop the server
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping API server...");

        self.shutdown_tx.send_replace(true);

        info!("API server stop signal sent");
        Ok(())
    }
}
