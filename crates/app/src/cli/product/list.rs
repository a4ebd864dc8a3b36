use clap::Args;

use catalog_app::domain::products::{
    PgProductsRepository, ProductsRepository, data::format_price,
};

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: ListProductsArgs) -> Result<(), CliError> {
    let products = PgProductsRepository::new(args.database.connect().await?)
        .list_products()
        .await
        .map_err(CliError::repository("list products"))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in products {
        println!("id: {}", product.id);
        println!("name: {}", product.name);
        println!("price: {}", format_price(product.price));
        println!("created_at: {}", product.created_at);
        println!("updated_at: {}", product.updated_at);
        println!();
    }

    Ok(())
}
