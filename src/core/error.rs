//! Typed error handling for the catalog
//!
//! Every failure that can reach an HTTP client is a [`CatalogError`]. Its
//! [`IntoResponse`] implementation is the only place where internal failures
//! are turned into the wire envelope `{success: false, message}`; handlers
//! return `Result<_, CatalogError>` and never build error bodies themselves.
//!
//! # Error Categories
//!
//! - [`CatalogError::NotFound`]: an unmatched resource reference
//! - [`CatalogError::RouteNotFound`]: a request no route matched
//! - [`ValidationError`]: structured field → message failures
//! - [`StorageError`]: storage backend failures (only writes reach callers)
//! - [`CatalogError::Internal`]: anything else

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Message shown for any not-found resource
pub const RESOURCE_NOT_FOUND: &str = "Resource not found";

/// Message shown for unmatched routes
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// The main error type of the catalog service
#[derive(Debug)]
pub enum CatalogError {
    /// A referenced resource does not exist
    NotFound { resource: String },

    /// No route matched the request
    RouteNotFound { path: String },

    /// Input failed validation
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Anything else
    Internal(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound { resource } => write!(f, "{} not found", resource),
            CatalogError::RouteNotFound { path } => write!(f, "No route for {}", path),
            CatalogError::Validation(e) => write!(f, "{}", e),
            CatalogError::Storage(e) => write!(f, "{}", e),
            CatalogError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Validation(e) => Some(e),
            CatalogError::Storage(e) => Some(e),
            CatalogError::NotFound { .. }
            | CatalogError::RouteNotFound { .. }
            | CatalogError::Internal(_) => None,
        }
    }
}

/// Message payload of the error envelope: a single text or a list of field messages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

/// Error envelope sent to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: ErrorMessage,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the wire envelope
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            CatalogError::NotFound { .. } => ErrorMessage::Text(RESOURCE_NOT_FOUND.to_string()),
            CatalogError::RouteNotFound { .. } => ErrorMessage::Text(ROUTE_NOT_FOUND.to_string()),
            CatalogError::Validation(e) => ErrorMessage::List(e.messages()),
            other => ErrorMessage::Text(other.to_string()),
        };

        ErrorResponse {
            success: false,
            message,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Internal(err.to_string())
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field → message mapping, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationError {
    fields: IndexMap<String, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`; a later message for the same field replaces the earlier one
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages in the order their fields were recorded
    pub fn messages(&self) -> Vec<String> {
        self.fields.values().cloned().collect()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl FromIterator<(String, String)> for ValidationError {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "Validation failed: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// The backend could not be reached
    Unavailable { backend: String, message: String },

    /// Reading the collection failed
    ReadFailed { backend: String, message: String },

    /// Writing the collection failed
    WriteFailed { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable { backend, message } => {
                write!(f, "Storage backend '{}' is unavailable: {}", backend, message)
            }
            StorageError::ReadFailed { backend, message } => {
                write!(f, "Failed to read from {}: {}", backend, message)
            }
            StorageError::WriteFailed { backend, message } => {
                write!(f, "Failed to write to {}: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        CatalogError::Storage(err)
    }
}
