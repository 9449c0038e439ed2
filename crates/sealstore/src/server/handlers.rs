//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use common::protocol::{ErrorResponse, HealthResponse, UploadResponse};
use common::ServiceError;
use tracing::warn;

use super::state::AppState;
use crate::crypto::envelope::{self, CipherError};
use crate::store::StoreError;

/// `POST /upload/{name}` — encrypt the request body and store it under `name`.
///
/// The raw request body is the plaintext; an empty body stores an empty
/// object. Re-uploading an existing name overwrites the previous blob.
pub async fn upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let blob = match envelope::seal(&body, state.master_key.as_bytes()) {
        Ok(blob) => blob,
        Err(e) => {
            // The key length is enforced at startup; reaching this is a bug.
            warn!(error = %e, "seal failed");
            return error_response(ServiceError::from(e));
        }
    };

    let stored_bytes = blob.len();
    if let Err(e) = state.store.put(&name, &blob).await {
        warn!(error = %e, name = %name, "store put failed");
        return error_response(ServiceError::from(e));
    }

    (StatusCode::OK, Json(UploadResponse { name, stored_bytes })).into_response()
}

/// `GET /download/{name}` — fetch, decrypt, and return the object's bytes.
///
/// A missing object is a plain 404. Every decryption failure — truncated
/// blob, corrupted data, wrong key — produces the same generic 400 response;
/// the actual cause is logged server-side only, so responses cannot be used
/// to probe the stored ciphertext.
pub async fn download(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let blob = match state.store.get(&name).await {
        Ok(blob) => blob,
        Err(e) => {
            if !matches!(e, StoreError::NotFound) {
                warn!(error = %e, name = %name, "store get failed");
            }
            return error_response(ServiceError::from(e));
        }
    };

    let plaintext = match envelope::open(&blob, state.master_key.as_bytes()) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, name = %name, "decryption failed");
            return error_response(ServiceError::from(e));
        }
    };

    let disposition = format!("attachment; filename=\"{}\"", name.replace('"', ""));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        plaintext,
    )
        .into_response()
}

/// `GET /health` — liveness check.
pub async fn health() -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Error mapping onto the service taxonomy
// ---------------------------------------------------------------------------

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::Io(_) => ServiceError::StoreUnavailable,
        }
    }
}

impl From<CipherError> for ServiceError {
    fn from(e: CipherError) -> Self {
        match e {
            // A structurally short blob and a failed tag collapse into one
            // indistinguishable outcome at the service boundary.
            CipherError::TruncatedEnvelope | CipherError::AuthenticationFailed => {
                ServiceError::DecryptionFailed
            }
            CipherError::InvalidKeyLength | CipherError::PlaintextTooLarge => {
                ServiceError::Internal("encryption failed".into())
            }
        }
    }
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err.code(), err.to_string());
    (status, Json(body)).into_response()
}
