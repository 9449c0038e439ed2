//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailed`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::StoreUnavailable`] → 503
/// - [`ServiceError::Internal`] → 500
///
/// `DecryptionFailed` is deliberately a single variant with a fixed message:
/// a structurally malformed blob and a failed authentication tag must be
/// indistinguishable to callers, so responses cannot be used as a decryption
/// oracle. A missing object stays a separate variant — not-found carries no
/// cryptographic information.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed — empty object name or invalid path.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The stored blob could not be decrypted. Covers wrong key, corrupted
    /// or truncated data, and tampering — callers are never told which.
    #[error("decryption failed")]
    DecryptionFailed,

    /// No object is stored under the requested name.
    #[error("object not found")]
    NotFound,

    /// The object store reported an I/O failure. Callers may retry these;
    /// they must not retry `DecryptionFailed`, which is deterministic.
    #[error("object store unavailable")]
    StoreUnavailable,

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailed => 400,
            ServiceError::NotFound => 404,
            ServiceError::StoreUnavailable => 503,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::DecryptionFailed => "decryption_failed",
            ServiceError::NotFound => "not_found",
            ServiceError::StoreUnavailable => "store_unavailable",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}
