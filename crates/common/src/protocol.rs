//! Request and response types exchanged between the service and its callers.
//!
//! These types are serialised as JSON. Download responses are raw
//! `application/octet-stream` bodies and have no type here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Upload endpoint
// ---------------------------------------------------------------------------

/// Successful response body for `POST /upload/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The logical object name the blob was stored under.
    pub name: String,
    /// Size in bytes of the encrypted blob written to the store
    /// (plaintext length + 32 bytes of nonce and tag).
    pub stored_bytes: usize,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"`.
    pub status: String,
    /// Server crate version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_round_trip() {
        let resp = UploadResponse {
            name: "report.pdf".into(),
            stored_bytes: 43,
        };
        let json = serde_json::to_string(&resp).unwrap();
        let decoded: UploadResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.name, "report.pdf");
        assert_eq!(decoded.stored_bytes, 43);
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("not_found", "object not found");
        assert_eq!(e.code, "not_found");
        assert!(e.message.contains("not found"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            version: "0.1.0".into(),
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.status, "ok");
    }
}
