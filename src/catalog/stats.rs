//! Aggregate price statistics

use crate::core::Product;
use serde::{Deserialize, Serialize};

/// Catalog-wide price statistics
///
/// An empty catalog yields all zeros, including the average.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductStats {
    #[serde(rename = "total_products")]
    pub count: usize,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub total_value: f64,
}

impl ProductStats {
    /// Reduce `products` in a single pass
    pub fn from_products(products: &[Product]) -> Self {
        let Some(first) = products.first() else {
            return Self::default();
        };

        let seed = Self {
            count: 0,
            average_price: 0.0,
            min_price: first.price,
            max_price: first.price,
            total_value: 0.0,
        };

        let mut stats = products.iter().fold(seed, |mut acc, product| {
            acc.count += 1;
            acc.total_value += product.price;
            acc.min_price = acc.min_price.min(product.price);
            acc.max_price = acc.max_price.max(product.price);
            acc
        });

        stats.average_price = stats.total_value / stats.count as f64;
        stats
    }
}
