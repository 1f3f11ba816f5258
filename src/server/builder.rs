//! ServerBuilder for fluent API to build the catalog HTTP server

use super::handlers::CatalogState;
use super::router::build_router;
use crate::catalog::{ListingService, ProductRepository};
use crate::config::ServerConfig;
use crate::core::StorageBackend;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the catalog server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_backend(InMemoryBackend::with_products(products))
///     .build()?;
/// ```
pub struct ServerBuilder {
    backend: Option<Arc<dyn StorageBackend>>,
    config: ServerConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            backend: None,
            config: ServerConfig::default(),
        }
    }

    /// Set the storage backend (required)
    pub fn with_backend(mut self, backend: impl StorageBackend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Set an already shared storage backend, e.g. the result of [`crate::storage::connect`]
    pub fn with_shared_backend(mut self, backend: Arc<dyn StorageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the listing service over the configured backend
    pub fn build_service(&self) -> Result<ListingService> {
        let backend = self
            .backend
            .clone()
            .ok_or_else(|| anyhow::anyhow!("A storage backend is required. Call .with_backend()"))?;

        Ok(ListingService::new(ProductRepository::new(backend)))
    }

    /// Build the final router with request tracing and CORS
    pub fn build(self) -> Result<Router> {
        let listing = self.build_service()?;
        tracing::debug!(backend = listing.repository().backend_name(), "building router");

        let state = CatalogState {
            listing: Arc::new(listing),
        };

        Ok(build_router(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured host and port and handles SIGTERM and
    /// SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let environment = self.config.environment.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server running in {} mode on {}", environment, addr);
        tracing::info!("API Base URL: http://{}/api/v1", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
