//! Storage capability shared by every backend

use crate::core::product::Product;
use anyhow::Result;
use async_trait::async_trait;

/// Whole-collection storage for product records
///
/// Implementations are selected once at startup and injected into the
/// repository. The catalog never updates single fields: a write replaces the
/// entire collection.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Short backend name used in logs and errors
    fn name(&self) -> &'static str;

    /// Read every record in storage order
    async fn read_all(&self) -> Result<Vec<Product>>;

    /// Replace the stored collection with `products`
    async fn write_all(&self, products: Vec<Product>) -> Result<()>;
}
