//! Request-scoped query values: search term, sort directive and repository filter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a price sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Sortable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
}

/// A parsed `field:direction` sort parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortDirective {
    pub fn price(order: SortOrder) -> Self {
        Self {
            field: SortField::Price,
            order,
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            SortField::Price => write!(f, "price:{}", self.order.as_str()),
        }
    }
}

/// Returned for any directive other than `price:asc` / `price:desc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedSort(pub String);

impl fmt::Display for UnsupportedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported sort directive '{}'", self.0)
    }
}

impl std::error::Error for UnsupportedSort {}

impl FromStr for SortDirective {
    type Err = UnsupportedSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || UnsupportedSort(s.to_string());
        let (field, direction) = s.split_once(':').ok_or_else(unsupported)?;

        let field = match field {
            "price" => SortField::Price,
            _ => return Err(unsupported()),
        };
        let order = match direction {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(unsupported()),
        };

        Ok(Self { field, order })
    }
}

/// Query string of `GET /products`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, directive: impl Into<String>) -> Self {
        self.sort = Some(directive.into());
        self
    }

    /// The search term, if present and non-empty
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }

    /// The sort directive, if it names a supported field and direction
    ///
    /// Anything unrecognized means "keep the filtered order".
    pub fn sort_directive(&self) -> Option<SortDirective> {
        let raw = self.sort.as_deref()?;
        match raw.parse() {
            Ok(directive) => Some(directive),
            Err(e) => {
                tracing::debug!("ignoring {}", e);
                None
            }
        }
    }
}

/// Minimal match specification understood by the repository
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring tested against name or description
    pub name_or_description: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn containing(term: impl Into<String>) -> Self {
        Self {
            name_or_description: Some(term.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_or_description
            .as_deref()
            .is_none_or(|term| term.is_empty())
    }
}
