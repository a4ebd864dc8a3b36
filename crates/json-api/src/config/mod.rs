//! Server configuration, read from flags, the environment and `.env`.

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    http::HttpConfig,
    logging::LoggingConfig,
    telemetry::TelemetryConfig,
};

pub(crate) mod db;
pub(crate) mod http;
pub(crate) mod logging;
pub(crate) mod telemetry;

/// Catalog JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "catalog-json", about = "Catalog JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// HTTP listener settings.
    #[command(flatten)]
    pub http: HttpConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export and request instrumentation settings.
    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Parse the process arguments after loading `.env` into the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or malformed.
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env is normal outside development.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.http.socket_addr()
    }
}
