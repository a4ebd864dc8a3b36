use clap::Args;

use catalog_app::domain::products::{
    PgProductsRepository, ProductsRepository,
    data::{NewProduct, format_price},
};

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product name; surrounding whitespace is trimmed
    #[arg(long)]
    name: String,

    /// Product price as a decimal, e.g. 12.50
    #[arg(long)]
    price: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), CliError> {
    // Validate before connecting.
    let product = NewProduct::new(&args.name, &args.price)?;

    let created = PgProductsRepository::new(args.database.connect().await?)
        .create_product(product)
        .await
        .map_err(CliError::repository("create product"))?;

    #[expect(clippy::print_stdout, reason = "CLI output")]
    {
        println!("id: {}", created.id);
        println!("name: {}", created.name);
        println!("price: {}", format_price(created.price));
        println!("created_at: {}", created.created_at);
    }

    Ok(())
}
