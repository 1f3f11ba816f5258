//! HTTP handlers for the catalog routes
//!
//! Handlers return `Result<_, CatalogError>`; error bodies are produced by
//! `CatalogError`'s `IntoResponse` implementation only.

use crate::catalog::{ListingService, ProductStats};
use crate::core::{CatalogError, ListQuery, Product, ValidationError};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::Uri;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state of the catalog routes
#[derive(Clone)]
pub struct CatalogState {
    pub listing: Arc<ListingService>,
}

/// Body of `GET /products`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub count: usize,
    pub products: Vec<Product>,
}

/// Body of `GET /products/stats`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: ProductStats,
}

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

fn query_rejected(rejection: QueryRejection) -> CatalogError {
    let mut errors = ValidationError::new();
    errors.add("query", rejection.body_text());
    errors.into()
}

/// `GET /products?search=<term>&sort=price:<asc|desc>`
pub async fn list_products(
    State(state): State<CatalogState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ProductsResponse>, CatalogError> {
    let Query(query) = query.map_err(query_rejected)?;
    let products = state.listing.list(&query).await?;

    Ok(Json(ProductsResponse {
        success: true,
        count: products.len(),
        products,
    }))
}

/// `GET /products/stats`
pub async fn product_stats(
    State(state): State<CatalogState>,
) -> Result<Json<StatsResponse>, CatalogError> {
    let stats = state.listing.stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
    })
}

/// Fallback for unmatched routes
pub async fn route_not_found(uri: Uri) -> CatalogError {
    CatalogError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
