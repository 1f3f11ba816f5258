//! Core module containing the product model, query types, errors and the storage trait

pub mod backend;
pub mod error;
pub mod product;
pub mod query;

pub use backend::StorageBackend;
pub use error::{CatalogError, ErrorMessage, ErrorResponse, StorageError, ValidationError};
pub use product::Product;
pub use query::{ListQuery, ProductFilter, SortDirective, SortField, SortOrder};
