//! Search, sort and statistics over the catalog

use super::repository::ProductRepository;
use super::stats::ProductStats;
use crate::core::{
    CatalogError, ListQuery, Product, ProductFilter, SortDirective, SortField, SortOrder,
};

/// Stable in-place sort by the directive's field
pub fn sort_products(products: &mut [Product], directive: SortDirective) {
    match (directive.field, directive.order) {
        (SortField::Price, SortOrder::Asc) => {
            products.sort_by(|a, b| a.price.total_cmp(&b.price));
        }
        (SortField::Price, SortOrder::Desc) => {
            products.sort_by(|a, b| b.price.total_cmp(&a.price));
        }
    }
}

/// Listing operations backing the HTTP API
///
/// Holds no product data between calls; each operation reads the catalog
/// afresh through the repository.
#[derive(Clone)]
pub struct ListingService {
    repository: ProductRepository,
}

impl ListingService {
    pub fn new(repository: ProductRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &ProductRepository {
        &self.repository
    }

    /// Products matching the optional search term, optionally sorted by price
    ///
    /// Read failures are already absorbed by the repository; the `Result`
    /// keeps handlers on the single `CatalogError` path.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Product>, CatalogError> {
        let filter = query
            .search_term()
            .map(ProductFilter::containing)
            .unwrap_or_default();

        let mut products = self.repository.matching(&filter).await;

        if let Some(directive) = query.sort_directive() {
            sort_products(&mut products, directive);
        }

        tracing::debug!(
            search = ?query.search_term(),
            sort = ?query.sort,
            count = products.len(),
            "listed products"
        );
        Ok(products)
    }

    /// Statistics over the whole, unfiltered catalog
    ///
    /// Fallible for the same reason as [`ListingService::list`].
    pub async fn stats(&self) -> Result<ProductStats, CatalogError> {
        let products = self.repository.find_all().await;
        Ok(ProductStats::from_products(&products))
    }
}
