//! # Product Catalog
//!
//! A read-only product catalog service and its client.
//!
//! ## Features
//!
//! - **Listing**: case-insensitive search over name and description, stable price sort
//! - **Statistics**: count, min, max, average and total price of the whole catalog
//! - **Pluggable storage**: MongoDB collection, JSON file, or an in-memory buffer
//! - **Uniform envelope**: every response carries `success`, errors a `message`
//! - **Client**: typed API client plus a listing view with client-side search and sort
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let backend = InMemoryBackend::with_products(vec![
//!     Product::new("Lamp", "Desk lamp", 20.0, "lamp.jpg", "Home"),
//! ]);
//!
//! ServerBuilder::new()
//!     .with_backend(backend)
//!     .serve()
//!     .await?;
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CatalogError, ListQuery, Product, ProductFilter, SortDirective, SortOrder, StorageBackend,
        StorageError, ValidationError,
    };

    // === Catalog ===
    pub use crate::catalog::{ListingService, ProductRepository, ProductStats};

    // === Storage ===
    pub use crate::storage::{FileBackend, InMemoryBackend};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::DatabaseBackend;

    // === Config ===
    pub use crate::config::{ClientConfig, ServerConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === Client ===
    pub use crate::client::{
        ClientError, DisplayProduct, FooterStats, ListingView, ProductClient, ProductQuery,
        ViewState, derive_view,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
