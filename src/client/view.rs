//! Client-side listing view
//!
//! The view fetches the full catalog once, then derives what it shows from
//! the search term and sort order without further network calls. Footer
//! statistics describe the displayed subset, unlike the server's stats
//! endpoint which covers the whole catalog.

use super::service::{ClientError, DisplayProduct, ProductClient, ProductsPage};
use crate::core::SortOrder;
use std::fmt::Write;

/// Filter by search term, then stable-sort by price
///
/// A blank term keeps every product. Matching is a case-insensitive
/// substring test against name or description.
pub fn derive_view(
    full: &[DisplayProduct],
    search_term: &str,
    sort_order: SortOrder,
) -> Vec<DisplayProduct> {
    let mut displayed: Vec<DisplayProduct> = if search_term.trim().is_empty() {
        full.to_vec()
    } else {
        let needle = search_term.to_lowercase();
        full.iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    };

    match sort_order {
        SortOrder::Asc => displayed.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Desc => displayed.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    displayed
}

/// Footer figures for the displayed products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterStats {
    pub total_products: usize,
    /// Average price with two decimals, `"0.00"` when nothing is shown
    pub average_price: String,
}

impl FooterStats {
    pub fn from_displayed(displayed: &[DisplayProduct]) -> Self {
        let average_price = if displayed.is_empty() {
            "0.00".to_string()
        } else {
            let sum: f64 = displayed.iter().map(|p| p.price).sum();
            let average = sum / displayed.len() as f64;
            // Half-cent ties round up, not to even
            format!("{:.2}", (average * 100.0).round() / 100.0)
        };

        Self {
            total_products: displayed.len(),
            average_price,
        }
    }
}

/// Visible state of the view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(Vec<DisplayProduct>),
}

/// The product listing screen
#[derive(Debug, Clone)]
pub struct ListingView {
    state: ViewState,
    search_term: String,
    sort_order: SortOrder,
    displayed: Vec<DisplayProduct>,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    /// A freshly mounted view, waiting for its fetch
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            search_term: String::new(),
            sort_order: SortOrder::default(),
            displayed: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Products currently shown; empty unless ready
    pub fn displayed(&self) -> &[DisplayProduct] {
        &self.displayed
    }

    /// Fetch the full catalog and settle into ready or error
    pub async fn load(&mut self, client: &ProductClient) {
        self.state = ViewState::Loading;
        let result = client.get_all_products(None).await;
        self.resolve(result);
    }

    /// Apply the outcome of the initial fetch
    pub fn resolve(&mut self, result: Result<ProductsPage, ClientError>) {
        match result {
            Ok(page) => {
                tracing::debug!(count = page.products.len(), "products loaded");
                self.state = ViewState::Ready(page.products);
            }
            Err(e) => {
                self.state = ViewState::Error(e.to_string());
            }
        }
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute();
    }

    /// Flip between ascending and descending price order
    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.displayed = match &self.state {
            ViewState::Ready(all) => derive_view(all, &self.search_term, self.sort_order),
            ViewState::Loading | ViewState::Error(_) => Vec::new(),
        };
    }

    /// Footer figures, available once ready
    pub fn footer(&self) -> Option<FooterStats> {
        matches!(self.state, ViewState::Ready(_))
            .then(|| FooterStats::from_displayed(&self.displayed))
    }

    pub fn sort_label(&self) -> &'static str {
        match self.sort_order {
            SortOrder::Asc => "Sort by Price (Low to High)",
            SortOrder::Desc => "Sort by Price (High to Low)",
        }
    }

    /// Render the view as plain text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Product Store")?;
        writeln!(out)?;

        match &self.state {
            ViewState::Loading => {
                writeln!(out, "Loading products...")?;
                return Ok(());
            }
            ViewState::Error(message) => {
                writeln!(out, "Error")?;
                writeln!(out, "{}", message)?;
                return Ok(());
            }
            ViewState::Ready(_) => {}
        }

        writeln!(out, "Search: {}", self.search_term)?;
        writeln!(out, "[{}]", self.sort_label())?;
        writeln!(out)?;

        if self.displayed.is_empty() {
            writeln!(out, "No products found")?;
            writeln!(out, "Try adjusting your search terms")?;
        } else {
            for product in &self.displayed {
                writeln!(out, "{}  ${:.2}", product.name, product.price)?;
                writeln!(out, "  {}", product.description)?;
                writeln!(out, "  {}", product.image_url)?;
            }
        }

        if let Some(footer) = self.footer() {
            writeln!(out)?;
            writeln!(out, "Total Products: {}", footer.total_products)?;
            writeln!(out, "Average Price: ${}", footer.average_price)?;
        }

        Ok(())
    }
}
