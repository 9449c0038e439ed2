//! Tracing subscriber initialisation: JSON log output with env-based filtering.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Configures a JSON-formatted [`tracing_subscriber`] layer for structured
/// log output, filtered by `RUST_LOG` when set and by `log_level` otherwise.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
