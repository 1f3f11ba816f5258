//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! Products live in a single `products` collection. Reads are whole-collection
//! scans; filtering and sorting happen in-process. Writes replace the whole
//! collection (`delete_many` followed by `insert_many`).
//!
//! Documents are mapped to [`Product`] directly through serde. Records inserted
//! by other tools usually carry an `ObjectId` as `_id`; it is rendered as its
//! hex string so the identifier stays opaque text.

use crate::core::{Product, StorageBackend, StorageError};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Collection, Database};

/// Name of the products collection
pub const COLLECTION: &str = "products";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a MongoDB document into a product, flattening `ObjectId` identifiers.
fn document_to_product(mut doc: Document) -> Result<Product> {
    if let Some(Bson::ObjectId(oid)) = doc.get("_id") {
        let hex = oid.to_hex();
        doc.insert("_id", hex);
    }

    let json = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(json).map_err(|e| anyhow!("Failed to deserialize product: {}", e))
}

/// Convert a product into a MongoDB document.
fn product_to_document(product: &Product) -> Result<Document> {
    mongodb::bson::to_document(product)
        .map_err(|e| anyhow!("Failed to convert product to BSON: {}", e))
}

// ---------------------------------------------------------------------------
// DatabaseBackend
// ---------------------------------------------------------------------------

/// Product storage backed by a MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// let uri = "mongodb://localhost:27017/product-listing";
/// let backend = DatabaseBackend::connect(uri, "product-listing").await?;
/// let products = backend.read_all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct DatabaseBackend {
    database: Database,
}

impl DatabaseBackend {
    /// Create a backend over an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to `uri` and verify the server answers a ping.
    ///
    /// The database named in the URI wins over `fallback_database`. Any
    /// failure is reported as [`StorageError::Unavailable`].
    pub async fn connect(uri: &str, fallback_database: &str) -> Result<Self, StorageError> {
        let unavailable = |message: String| StorageError::Unavailable {
            backend: "mongodb".to_string(),
            message,
        };

        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| unavailable(format!("invalid connection string: {}", e)))?;

        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_database));

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| unavailable(format!("ping failed: {}", e)))?;

        tracing::info!(database = %database.name(), "Connected to MongoDB");
        Ok(Self::new(database))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }
}

#[async_trait]
impl StorageBackend for DatabaseBackend {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn read_all(&self) -> Result<Vec<Product>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to list products: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect products: {}", e))?;

        docs.into_iter().map(document_to_product).collect()
    }

    async fn write_all(&self, products: Vec<Product>) -> Result<()> {
        let docs = products
            .iter()
            .map(product_to_document)
            .collect::<Result<Vec<_>>>()?;

        self.collection()
            .delete_many(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to clear products: {}", e))?;

        // insert_many rejects an empty batch
        if !docs.is_empty() {
            self.collection()
                .insert_many(docs)
                .await
                .map_err(|e| anyhow!("Failed to insert products: {}", e))?;
        }

        Ok(())
    }
}
