//! Client side of the catalog: API client and listing view

pub mod service;
pub mod view;

pub use service::{ClientError, DisplayProduct, ProductClient, ProductQuery, ProductsPage};
pub use view::{FooterStats, ListingView, ViewState, derive_view};
