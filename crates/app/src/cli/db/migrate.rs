use clap::Args;

use catalog_app::database;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    database::migrate(&pool).await?;

    let latest = database::MIGRATOR
        .iter()
        .map(|migration| migration.version)
        .max()
        .unwrap_or_default();

    #[expect(clippy::print_stdout, reason = "CLI output")]
    {
        println!("schema is at version {latest}");
    }

    Ok(())
}
