//! Configuration loading and validation for the sealstore service.
//!
//! All values are read from environment variables at startup. The process
//! will exit with a clear error message if any required variable is missing
//! or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Standard-base64 encoding of the 256-bit master key. **Required.**
    /// Decoded and length-checked once at startup; see `key::MasterKey`.
    pub master_key: String,

    /// Directory encrypted blobs are stored under.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "server_uploads".into()
}
fn default_http_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.master_key, "MASTER_KEY")?;
        ensure_non_empty(&self.data_dir, "DATA_DIR")?;

        if self.http_port == 0 {
            anyhow::bail!("HTTP_PORT must be a non-zero port number");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The key is secret material; never echo it, even encoded.
        f.debug_struct("Config")
            .field("master_key", &"[REDACTED]")
            .field("data_dir", &self.data_dir)
            .field("http_port", &self.http_port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
