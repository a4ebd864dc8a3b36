//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::ProductsError, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Every product, in ascending id order
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns a list of products.
#[endpoint(tags("products"), summary = "List Products")]
#[tracing::instrument(name = "products.index", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, ProductsError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(|error| ProductsError::storage(error, None))?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
