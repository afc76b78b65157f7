//! Error types for the travel domain services.

use wayfarer_core::error::WayfarerError;

/// Errors a domain service may return.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl From<ServiceError> for WayfarerError {
    fn from(err: ServiceError) -> Self {
        WayfarerError::Service(err.to_string())
    }
}
