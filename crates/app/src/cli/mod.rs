//! `catalog-app` administrative commands.

use clap::{Args, Parser, Subcommand};
use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;

use catalog_app::{
    database,
    domain::products::{ProductsRepositoryError, ValidationError},
};

mod db;
mod product;

#[derive(Debug, Parser)]
#[command(name = "catalog-app", about = "Catalog CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema management
    Db(db::DbCommand),

    /// Inspect and create products
    Product(product::ProductCommand),
}

/// Connection settings shared by every command that touches the database.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, CliError> {
        database::connect(&self.database_url)
            .await
            .map_err(CliError::Connect)
    }
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] MigrateError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("failed to {action}: {source}")]
    Repository {
        action: &'static str,
        #[source]
        source: ProductsRepositoryError,
    },
}

impl CliError {
    pub(crate) fn repository(action: &'static str) -> impl FnOnce(ProductsRepositoryError) -> Self {
        move |source| Self::Repository { action, source }
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Db(command) => command.run().await,
            Commands::Product(command) => command.run().await,
        }
    }
}
