use clap::{Args, Subcommand};

use crate::cli::CliError;

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Create a product
    Create(create::CreateProductArgs),

    /// Print every product
    List(list::ListProductsArgs),
}

impl ProductCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            ProductSubcommand::Create(args) => create::run(args).await,
            ProductSubcommand::List(args) => list::run(args).await,
        }
    }
}
