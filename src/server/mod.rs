//! Server module for building the catalog HTTP API
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/v1/products`
//! - `GET /api/v1/products/stats`

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{CatalogState, HealthResponse, ProductsResponse, StatsResponse};
pub use router::{API_PREFIX, build_product_routes, build_router};
