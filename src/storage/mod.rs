//! Storage implementations for different backends

pub mod file;
pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use file::FileBackend;
pub use in_memory::InMemoryBackend;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::DatabaseBackend;

use crate::config::ServerConfig;
use crate::core::StorageBackend;
use std::sync::Arc;

/// Select the storage backend once, at startup
///
/// A reachable database wins; otherwise the catalog runs from the JSON file
/// named in the configuration. The choice is not revisited per request.
pub async fn connect(config: &ServerConfig) -> Arc<dyn StorageBackend> {
    #[cfg(feature = "mongodb_backend")]
    if let Some(uri) = config.mongodb_uri.as_deref() {
        match DatabaseBackend::connect(uri, &config.database).await {
            Ok(backend) => return Arc::new(backend),
            Err(e) => {
                tracing::warn!(error = %e, "Error connecting to MongoDB");
                tracing::warn!("Continuing in file-backed mode without database");
            }
        }
    }

    #[cfg(not(feature = "mongodb_backend"))]
    if config.mongodb_uri.is_some() {
        tracing::info!("Built without MongoDB support, ignoring configured database URI");
    }

    tracing::info!(path = %config.data_file.display(), "Using file storage");
    Arc::new(FileBackend::new(&config.data_file))
}
