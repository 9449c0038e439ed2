//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::key::MasterKey;
use crate::store::ObjectStore;

/// Application state shared across all request handlers.
///
/// Both fields are `Arc`-wrapped so Axum can clone the state per request
/// without copying key material or the store handle.
#[derive(Clone)]
pub struct AppState {
    /// Store the encrypted blobs live in.
    pub store: Arc<dyn ObjectStore>,
    /// Process-wide master key, validated once at startup and immutable
    /// afterwards.
    pub master_key: Arc<MasterKey>,
}

impl AppState {
    /// Create a new [`AppState`] with the provided store and key.
    pub fn new(store: Arc<dyn ObjectStore>, master_key: Arc<MasterKey>) -> Self {
        Self { store, master_key }
    }
}
