//! The product record, the only entity of the catalog

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product as stored and as sent over the wire
///
/// External keys are snake_case; the identifier travels as `_id` (MongoDB
/// convention), with `id` accepted on input so hand-written seed files work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
}

impl Product {
    /// Create a product with a freshly generated identifier
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            price,
            image_url: image_url.into(),
            category: category.into(),
        }
    }

    /// Case-insensitive substring test against name or description
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Check the record contract before it is written to storage
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            errors.add("price", "Price must be a non-negative number");
        }

        errors.into_result()
    }
}
