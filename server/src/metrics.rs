//! Prometheus exporter for the booking metrics.
//!
//! `MetricsServer::start` installs the global recorder; `router` serves the
//! rendered registry at `/metrics` on its own listener, so scrapes never
//! share the booking API's port.

use axum::{Router, routing::get};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
    /// Failed to bind HTTP server
    #[error("Failed to bind metrics server: {0}")]
    Bind(#[from] std::io::Error),
}

/// Prometheus metrics server.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a metrics server bound to `addr` once served.
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr, handle: None }
    }

    /// Address the exporter listens on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Describe the booking metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or another recorder is
    /// already installed.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        let handle = builder
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        // Descriptions go to whichever recorder is installed.
        hotel_booking::metrics::register_metrics();

        self.handle = Some(handle);
        tracing::info!(addr = %self.addr, "Metrics available at http://{}/metrics", self.addr);
        Ok(())
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the server hasn't been started.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }

    /// Router serving `GET /metrics`, once started.
    #[must_use]
    pub fn router(&self) -> Option<Router> {
        let handle = self.handle.clone()?;
        Some(Router::new().route("/metrics", get(move || async move { handle.render() })))
    }

    /// Bind the exporter's listener and serve until the task is dropped.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Install` if the server hasn't been started, or
    /// `MetricsError::Bind` if the listener cannot be bound.
    pub async fn serve(&self) -> Result<(), MetricsError> {
        let router = self
            .router()
            .ok_or_else(|| MetricsError::Install("recorder not installed".to_string()))?;
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }
}
