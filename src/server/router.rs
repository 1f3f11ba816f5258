//! Route table of the catalog API

use super::handlers::{
    CatalogState, health_check, list_products, product_stats, route_not_found,
};
use axum::{Router, routing::get};

/// Prefix of the versioned API routes
pub const API_PREFIX: &str = "/api/v1";

/// Build the product routes (relative to [`API_PREFIX`])
///
/// - GET /products - List products, with optional `search` and `sort`
/// - GET /products/stats - Catalog-wide statistics
pub fn build_product_routes(state: CatalogState) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/stats", get(product_stats))
        .with_state(state)
}

/// Build the complete application router
///
/// - GET /health - Liveness probe
/// - GET /api/v1/products, GET /api/v1/products/stats
/// - anything else - `Route not found` envelope with status 404
pub fn build_router(state: CatalogState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, build_product_routes(state))
        .fallback(route_not_found)
}
