//! nmk-utils: Common utilities shared across nmk crates
//!
//! This crate provides:
//! - Unified error types ([`NmkError`], [`Result`])
//! - Logging infrastructure ([`init_logging_with_config`], [`LogConfig`])
//! - Installation directory lookup ([`NmkHome`])
//! - The `config.json` loader ([`NmkConfig`])

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

// Re-export main types at crate root for convenience
pub use config::NmkConfig;
pub use error::{NmkError, Result};
pub use logging::{init_logging_with_config, LogConfig};
pub use paths::NmkHome;
