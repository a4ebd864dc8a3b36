use clap::{Args, Subcommand};

use crate::cli::CliError;

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
}

impl DbCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            DbSubcommand::Migrate(args) => migrate::run(args).await,
        }
    }
}
