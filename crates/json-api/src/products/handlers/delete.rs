//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    products::{errors::ProductsError, get::ProductEnvelope, requests::parse_id},
    state::State,
};

/// Delete Product Handler
///
/// Returns the product as it was before removal.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
    ),
)]
#[tracing::instrument(name = "products.delete", skip(id, depot), fields(product_id = %id.as_str()), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ProductsError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = parse_id(&id, None)?;

    let deleted = state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(|error| ProductsError::storage(error, None))?
        .ok_or_else(|| ProductsError::not_found(None))?;

    info!(product_id = %deleted.id, "product deleted");

    Ok(Json(ProductEnvelope {
        product: deleted.into(),
    }))
}
