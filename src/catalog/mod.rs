//! Catalog queries: repository, listing and statistics

pub mod listing;
pub mod repository;
pub mod stats;

pub use listing::{ListingService, sort_products};
pub use repository::ProductRepository;
pub use stats::ProductStats;
