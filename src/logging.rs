//! Logging configuration for the bridge
//!
//! Thin wrapper around `tracing-subscriber` so embedders get consistent,
//! env-filterable output without wiring the subscriber themselves.

use crate::error::{BridgeError, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level when RUST_LOG is not set
    pub level: Level,

    /// Include target module paths
    pub targets: bool,

    /// Log to stderr instead of stdout
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            targets: true,
            stderr: true,
        }
    }
}

/// Initialize logging with the given configuration
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(config.targets);

    let result = if config.stderr {
        builder.with_writer(std::io::stderr).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| BridgeError::config(format!("failed to set subscriber: {e}")))
}
