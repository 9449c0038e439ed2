//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material or object plaintext** must appear in any log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`).

pub mod init;

pub use init::init_telemetry;
