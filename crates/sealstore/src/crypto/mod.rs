//! Authenticated envelope encryption for stored objects.
//!
//! This module is intentionally free of HTTP and filesystem dependencies.
//! It provides the seal/open transform used by the upload and download
//! handlers.
//!
//! # Envelope format
//!
//! ```text
//! nonce (16 bytes) || tag (16 bytes) || ciphertext (plaintext length)
//! ```
//!
//! No version byte, no length prefix, no associated data — callers must know
//! out-of-band which key produced a given envelope.

pub mod envelope;

pub use envelope::KEY_LEN;
