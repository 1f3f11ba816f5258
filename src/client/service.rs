//! HTTP client for the catalog API
//!
//! Translates wire records (snake_case keys, `_id`) into [`DisplayProduct`]
//! and turns every failure into a single [`ClientError`] whose message is
//! meant to be shown to the user as-is.

use crate::catalog::ProductStats;
use crate::config::ClientConfig;
use crate::core::{Product, SortDirective};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure of a client call
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status code
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The server answered `success: false`
    #[error("{0}")]
    Api(String),

    /// Network or decoding failure
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// A product in the shape the listing view works with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
    pub category: String,
}

impl From<Product> for DisplayProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            image_url: product.image_url,
            category: product.category,
        }
    }
}

/// Optional filters of [`ProductClient::get_all_products`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub search: Option<String>,
    /// Forwarded as-is; the server does not filter by category
    pub category: Option<String>,
    pub sort: Option<SortDirective>,
}

impl ProductQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        pairs
    }
}

/// Result of [`ProductClient::get_all_products`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsPage {
    pub products: Vec<DisplayProduct>,
    pub total: usize,
    pub count: usize,
}

/// Union of the envelopes the API may answer with
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    products: Option<Vec<Product>>,
    #[serde(default)]
    stats: Option<ProductStats>,
}

impl ApiEnvelope {
    /// `error`, then `message`, then `fallback`
    fn failure(&self, fallback: &str) -> ClientError {
        let text = [&self.error, &self.message]
            .into_iter()
            .flatten()
            .find_map(message_text)
            .unwrap_or_else(|| fallback.to_string());
        ClientError::Api(text)
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

/// Catalog API client
#[derive(Clone, Debug)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProductClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<ApiEnvelope, ClientError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<ApiEnvelope>().await?)
    }

    async fn request(
        &self,
        endpoint: &str,
        query: &[(&'static str, String)],
    ) -> Result<ApiEnvelope, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let result = self.send(&url, query).await;
        if let Err(e) = &result {
            tracing::error!(url = %url, error = %e, "API request failed");
        }
        result
    }

    /// Fetch the product list, optionally filtered and sorted by the server
    pub async fn get_all_products(
        &self,
        filters: Option<&ProductQuery>,
    ) -> Result<ProductsPage, ClientError> {
        let pairs = filters.map(ProductQuery::to_pairs).unwrap_or_default();
        let envelope = self.request("/products", &pairs).await?;

        if !envelope.success {
            let err = envelope.failure("Failed to fetch products");
            tracing::error!(error = %err, "Failed to get products");
            return Err(err);
        }

        let products: Vec<DisplayProduct> = envelope
            .products
            .unwrap_or_default()
            .into_iter()
            .map(DisplayProduct::from)
            .collect();
        let count = envelope.count.filter(|&c| c > 0).unwrap_or(products.len());

        Ok(ProductsPage {
            products,
            total: count,
            count,
        })
    }

    /// Fetch catalog-wide statistics; a success without a payload is all zeros
    pub async fn get_product_stats(&self) -> Result<ProductStats, ClientError> {
        let envelope = self.request("/products/stats", &[]).await?;

        if !envelope.success {
            let err = envelope.failure("Failed to fetch product statistics");
            tracing::error!(error = %err, "Failed to get product stats");
            return Err(err);
        }

        Ok(envelope.stats.unwrap_or_default())
    }
}
