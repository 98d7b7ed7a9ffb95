//! # Error Taxonomy
//!
//! Purpose: the one place that names every error shape the HTTP surface can
//! return, so handlers and the client agree on status codes and bodies
//! without duplicating the mapping.
//!
//! ## Design Principles
//! 1. **Three Buckets**: client error (400), not-found (404), and
//!    transport/internal (500), matching the propagation rule that the
//!    cache engine never raises errors for negative outcomes — only
//!    timeouts and shape mismatches become 500s.
//! 2. **Named Keys**: every variant carries enough context (key, subkey)
//!    to produce a message that names the offending entity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy shared by the server and the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, CAS mismatch, duplicate key, or op on a missing
    /// container. Maps to HTTP 400.
    #[error("{0}")]
    BadRequest(String),
    /// Top-level key absent on a `Get` or `Delete`. Maps to HTTP 404.
    #[error("key '{0}' was not found")]
    NotFound(String),
    /// Reply timeout, reply shape mismatch, or storage failure. Maps to
    /// HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// Builds the `{status: <message>}` wire body for this error.
    pub fn to_body(&self) -> ErrorContract {
        ErrorContract {
            status: self.to_string(),
        }
    }
}

/// Wire shape for every error response: `{"status": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorContract {
    pub status: String,
}
