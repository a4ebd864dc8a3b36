//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::{ProductRecord, data::format_price};

use crate::{
    extensions::*,
    products::{errors::ProductsError, requests::parse_id},
    state::State,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Database assigned identifier
    pub id: i64,

    /// Trimmed display name
    pub name: String,

    /// Price with exactly two decimal places, e.g. `"12.50"`
    pub price: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            name: product.name,
            price: format_price(product.price),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// `{"product": ...}`, returned by update and delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub product: ProductResponse,
}

/// `{"products": ...}` holding a single product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductLookupResponse {
    pub products: ProductResponse,
}

/// Get Product Handler
///
/// Returns one product under the `products` key.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
    ),
)]
#[tracing::instrument(name = "products.get", skip(id, depot), fields(product_id = %id.as_str()), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductLookupResponse>, ProductsError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = parse_id(&id, None)?;

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(|error| ProductsError::storage(error, None))?
        .ok_or_else(|| ProductsError::not_found(None))?;

    Ok(Json(ProductLookupResponse {
        products: product.into(),
    }))
}
