//! # Quasar Telemetry
//!
//! Structured logging for the Quasar registry runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quasar_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Registry events and rejections are now logged
//!     Ok(())
//! }
//! ```
//!
//! Logs go to stderr so stdout stays free for command output.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QUASAR_SERVICE_NAME` | `quasar` | Service name in logs |
//! | `QUASAR_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `QUASAR_JSON_LOGS` | `false` | JSON output (default `true` in containers) |
//! | `QUASAR_CONSOLE_OUTPUT` | `true` | Disable to silence all output |

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME};
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Global subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Initialize logging and return a guard for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_logging(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs shutdown when dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was initialized with.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
