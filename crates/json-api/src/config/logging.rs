//! Log output settings.

use clap::{Args, ValueEnum};

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line, human-readable output
    Compact,

    /// One JSON object per event, including the active span list
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` holds no valid filter
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
