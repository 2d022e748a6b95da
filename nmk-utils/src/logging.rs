//! Logging infrastructure for nmk
//!
//! Provides unified logging setup using the tracing ecosystem. The launcher
//! replaces itself with tmux, so everything goes to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{NmkError, Result};

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "NMK_LOG";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "nmk_launcher=trace")
    pub filter: String,
    /// Include file/line in logs
    pub file_line: bool,
    /// Emit ANSI colors
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            file_line: false,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Create config from the command line verbosity
    ///
    /// `NMK_LOG` wins over the flags when it is set.
    pub fn from_verbosity(debug: bool, verbose: u8) -> Self {
        Self::with_override(debug, verbose, std::env::var(LOG_ENV).ok())
    }

    fn with_override(debug: bool, verbose: u8, env_filter: Option<String>) -> Self {
        let level = match (debug, verbose) {
            (_, v) if v >= 2 => "trace",
            (true, _) | (_, 1) => "debug",
            _ => "info",
        };
        Self {
            file_line: level == "trace",
            filter: env_filter.unwrap_or_else(|| level.into()),
            ..Default::default()
        }
    }
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| NmkError::Logging(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .with_ansi(config.ansi)
        .with_file(config.file_line)
        .with_line_number(config.file_line)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| NmkError::Logging(e.to_string()))
}
