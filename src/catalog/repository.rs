//! Query façade over the injected storage backend

use crate::core::{CatalogError, Product, ProductFilter, StorageBackend, StorageError};
use std::sync::Arc;

/// Read access to the catalog plus whole-collection replacement for seeding
///
/// Read failures are logged and normalized to an empty catalog; write
/// failures are returned to the caller.
#[derive(Clone)]
pub struct ProductRepository {
    backend: Arc<dyn StorageBackend>,
}

impl ProductRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Every record, in storage order, or the read failure
    pub async fn try_find_all(&self) -> Result<Vec<Product>, StorageError> {
        self.backend
            .read_all()
            .await
            .map_err(|e| StorageError::ReadFailed {
                backend: self.backend.name().to_string(),
                message: e.to_string(),
            })
    }

    /// Every record, in storage order; an empty catalog when the read fails
    pub async fn find_all(&self) -> Vec<Product> {
        self.try_find_all().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "serving an empty catalog");
            Vec::new()
        })
    }

    /// Number of records
    pub async fn count(&self) -> usize {
        self.find_all().await.len()
    }

    /// Records matching `filter`, order preserved
    pub async fn matching(&self, filter: &ProductFilter) -> Vec<Product> {
        let products = self.find_all().await;

        let Some(term) = filter.name_or_description.as_deref().filter(|t| !t.is_empty()) else {
            return products;
        };

        let needle = term.to_lowercase();
        products
            .into_iter()
            .filter(|product| product.matches_lowercase(&needle))
            .collect()
    }

    /// Validate every record, then replace the stored collection
    pub async fn replace_all(&self, products: Vec<Product>) -> Result<(), CatalogError> {
        for product in &products {
            product.validate()?;
        }

        let count = products.len();
        self.backend
            .write_all(products)
            .await
            .map_err(|e| StorageError::WriteFailed {
                backend: self.backend.name().to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(backend = self.backend.name(), count, "catalog replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    struct BrokenBackend;

    #[async_trait]
    impl StorageBackend for BrokenBackend {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn read_all(&self) -> Result<Vec<Product>> {
            Err(anyhow!("connection reset"))
        }

        async fn write_all(&self, _products: Vec<Product>) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("Test Product 1", "First item", 149.99, "1.jpg", "A"),
            Product::new("Gadget", "Works like test product 1", 99.99, "2.jpg", "B"),
            Product::new("Widget", "Plain widget", 10.0, "3.jpg", "A"),
        ]
    }

    fn repository(products: Vec<Product>) -> ProductRepository {
        ProductRepository::new(Arc::new(InMemoryBackend::with_products(products)))
    }

    #[tokio::test]
    async fn test_find_all_and_count() {
        let products = catalog();
        let repo = repository(products.clone());

        assert_eq!(repo.find_all().await, products);
        assert_eq!(repo.count().await, 3);
    }

    #[tokio::test]
    async fn test_empty_filter_is_identity() {
        let repo = repository(catalog());

        let all = repo.matching(&ProductFilter::all()).await;
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Test Product 1", "Gadget", "Widget"]);
    }

    #[tokio::test]
    async fn test_filter_matches_name_or_description() {
        let repo = repository(catalog());

        let matched = repo.matching(&ProductFilter::containing("PRODUCT 1")).await;
        let names: Vec<&str> = matched.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Test Product 1", "Gadget"]);
    }

    #[tokio::test]
    async fn test_read_failure_is_reported_as_read_failed() {
        let repo = ProductRepository::new(Arc::new(BrokenBackend));

        let err = repo.try_find_all().await.unwrap_err();
        assert!(matches!(err, StorageError::ReadFailed { ref backend, .. } if backend == "broken"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_read_failure_is_empty() {
        let repo = ProductRepository::new(Arc::new(BrokenBackend));

        assert!(repo.find_all().await.is_empty());
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let repo = ProductRepository::new(Arc::new(BrokenBackend));

        let err = repo.replace_all(catalog()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(StorageError::WriteFailed { .. })));
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn test_replace_all_rejects_invalid_records() {
        let backend = InMemoryBackend::new();
        let repo = ProductRepository::new(Arc::new(backend.clone()));

        let mut products = catalog();
        products[1].price = -5.0;

        let err = repo.replace_all(products).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(backend.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_writes_through() {
        let repo = repository(vec![]);

        repo.replace_all(catalog()).await.unwrap();
        assert_eq!(repo.count().await, 3);
    }
}
