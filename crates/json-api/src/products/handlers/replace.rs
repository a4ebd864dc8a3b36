//! Replace Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};
use tracing::info;

use catalog_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        create::ProductEchoResponse,
        errors::ProductsError,
        requests::{ProductRequest, parse_body, parse_id, read_json},
    },
    state::State,
};

/// Replace Product Handler
///
/// Overwrites both fields of an existing product and responds like create.
/// An id with no product is reported as `invalid data`.
#[endpoint(
    tags("products"),
    summary = "Replace Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product replaced"),
    ),
)]
#[tracing::instrument(
    name = "products.replace",
    skip(id, req, depot, res),
    fields(product_id = %id.as_str()),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEchoResponse>, ProductsError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = read_json(req).await?;
    let product = parse_id(&id, Some(&body))?;

    let replacement = NewProduct::try_from(parse_body::<ProductRequest>(&body)?)
        .map_err(|error| ProductsError::validation(&error, Some(body.clone())))?;

    let replaced = state
        .app
        .products
        .update_product(product, replacement.into())
        .await
        .map_err(|error| ProductsError::storage(error, Some(body.clone())))?
        .ok_or_else(|| ProductsError::invalid("invalid data", Some(body.clone())))?;

    info!(product_id = %replaced.id, "product replaced");

    res.add_header(LOCATION, format!("/products/{}", replaced.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductEchoResponse { product: body }))
}
