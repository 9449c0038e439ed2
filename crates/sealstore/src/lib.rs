//! sealstore service library.
//!
//! Exposes the envelope codec, master-key handling, object store, and HTTP
//! layer so the binary and the integration tests share one implementation.

pub mod config;
pub mod crypto;
pub mod key;
pub mod server;
pub mod store;
pub mod telemetry;
