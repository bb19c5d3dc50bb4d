//! Diagnostic logging for the command line.
//!
//! Logs go to stderr so that the generation report on stdout stays clean.

use blueprint_core::CoreError;
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: String,
    /// One JSON object per event instead of plain text
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// `-v` shows written and skipped files, `-vv` adds resolution details
    pub fn from_verbosity(verbose: u8, json_format: bool) -> Self {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };

        Self {
            level: level.to_string(),
            json_format,
        }
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CoreError::validation(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let result = if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).without_time())
            .try_init()
    };

    result.map_err(|e| CoreError::codegen(format!("Failed to initialise logging: {}", e)))?;

    let format = if config.json_format { "json" } else { "text" };
    tracing::debug!(level = %config.level, format, "Logging initialised");

    Ok(())
}
