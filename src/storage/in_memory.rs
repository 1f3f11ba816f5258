//! In-memory storage backend for testing and development

use crate::core::{Product, StorageBackend};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-process product buffer
///
/// Writes replace the whole buffer, mirroring the file backend without
/// touching disk. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryBackend {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-filled with `products`
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read_all(&self) -> Result<Vec<Product>> {
        let products = self
            .products
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(products.clone())
    }

    async fn write_all(&self, products: Vec<Product>) -> Result<()> {
        let mut stored = self
            .products
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        *stored = products;

        Ok(())
    }
}
