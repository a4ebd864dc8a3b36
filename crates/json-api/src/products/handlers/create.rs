//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use catalog_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        errors::ProductsError,
        requests::{ProductRequest, parse_body, read_json},
    },
    state::State,
};

/// `{"product": ...}` echoing the submitted payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEchoResponse {
    /// The request body as received
    #[salvo(schema(value_type = Object))]
    pub product: Value,
}

/// Create Product Handler
///
/// Responds with the submitted payload. The assigned id is in the `Location`
/// header.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(req, depot, res),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEchoResponse>, ProductsError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = read_json(req).await?;

    let product = NewProduct::try_from(parse_body::<ProductRequest>(&body)?)
        .map_err(|error| ProductsError::validation(&error, Some(body.clone())))?;

    let created = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(|error| ProductsError::storage(error, Some(body.clone())))?;

    tracing::Span::current().record("product_id", created.id.into_i64());

    info!(product_id = %created.id, "product created");

    res.add_header(LOCATION, format!("/products/{}", created.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductEchoResponse { product: body }))
}
