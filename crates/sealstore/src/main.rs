//! `sealstore` — encrypted object-storage service entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging.
//! 3. Decode and validate the master key; refuse to start on any mismatch.
//! 4. Open the flat-file object store.
//! 5. Build the Axum router and start the HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use sealstore::config::Config;
use sealstore::key::MasterKey;
use sealstore::server::{router, state::AppState};
use sealstore::store::FsStore;
use sealstore::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_port = cfg.http_port,
        "sealstore starting"
    );

    // -----------------------------------------------------------------------
    // 3. Master key — the single validation point for key material
    // -----------------------------------------------------------------------
    let master_key = MasterKey::from_base64(&cfg.master_key)
        .context("MASTER_KEY must be standard base64 decoding to exactly 32 bytes")?;

    // -----------------------------------------------------------------------
    // 4. Object store
    // -----------------------------------------------------------------------
    let store = FsStore::new(&cfg.data_dir)
        .with_context(|| format!("failed to open object store at {}", cfg.data_dir))?;

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Arc::new(store), Arc::new(master_key));
    let app = router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.http_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
