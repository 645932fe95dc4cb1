//! API Server
//!
//! Binds the HTTP listener and serves the router until shutdown.

use crate::error::{Error, Result};
use crate::inference::ClusterService;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

use super::rest::RestRouter;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// HTTP bind address
    pub listen_addr: SocketAddr,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Max request body size
    pub max_body_size: usize,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            request_timeout_secs: 10,
            max_body_size: 64 * 1024, // 64KB
        }
    }
}

// =============================================================================
// API Server
// =============================================================================

/// HTTP server for the prediction endpoints
pub struct ApiServer {
    config: ApiServerConfig,
    service: ClusterService,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, service: ClusterService) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            service,
            shutdown_tx,
        }
    }

    /// Serve until Ctrl-C or [`ApiServer::shutdown`]
    pub async fn run(&self) -> Result<()> {
        let app = RestRouter::new(self.service.clone())
            .max_body_size(self.config.max_body_size)
            .request_timeout(Duration::from_secs(self.config.request_timeout_secs))
            .build();

        let listener = tokio::net::TcpListener::bind(self.config.listen_addr)
            .await
            .map_err(|e| Error::Internal(format!("Failed to bind HTTP server: {}", e)))?;

        info!("HTTP server listening on {}", self.config.listen_addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_rx.wait_for(|stop| *stop) => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| Error::Internal(format!("HTTP server error: {}", e)))?;

        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::fixtures::test_store;
    use crate::metrics::ServiceMetrics;
    use std::sync::Arc;

    #[test]
    fn test_default_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.listen_addr.port(), 5000);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[tokio::test]
    async fn test_shutdown_stops_server() {
        let config = ApiServerConfig {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..Default::default()
        };
        let service = ClusterService::new(test_store(), ServiceMetrics::new().unwrap());
        let server = Arc::new(ApiServer::new(config, service));

        let running = tokio::spawn({
            let server = server.clone();
            async move { server.run().await }
        });

        server.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(5), running)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
