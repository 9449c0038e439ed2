//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, response compression, and
//! the upload body cap.

use std::time::Duration;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum accepted upload body size. Seal and open operate on the whole
/// blob in memory, so this also bounds per-request memory use.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;
