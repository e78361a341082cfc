//! Logging setup for the generator CLI.
//!
//! Structured tracing to stderr; pretty output for interactive use, JSON for
//! automation. The filter comes from `RUST_LOG` and defaults to `info`.

use anyhow::Result;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Read `ATTRGEN_LOG_FORMAT` (`json` or `pretty`).
    pub fn from_env() -> Self {
        let format = match env::var("ATTRGEN_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self { format }
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
    };
    result.map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}
