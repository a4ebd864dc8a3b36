//! Product request bodies and path parameters.
//!
//! Bodies are read as raw JSON first so that a rejected payload can be echoed
//! back to the caller verbatim, then deserialized into the typed requests.

use std::fmt::{Formatter, Result as FmtResult};

use salvo::Request;
use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error as DeError, Visitor},
};
use serde_json::Value;
use tracing::warn;

use catalog_app::domain::products::{
    ProductId, ValidationError,
    data::{NewProduct, ProductUpdate},
};

use crate::products::errors::ProductsError;

/// Full product payload, used by create and replace.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub price: PriceInput,
}

impl TryFrom<ProductRequest> for NewProduct {
    type Error = ValidationError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        NewProduct::new(&request.name, request.price.as_str())
    }
}

/// Partial product payload; absent fields are left untouched.
///
/// A key that is present must carry a value, so `null` is rejected rather than
/// read as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProductPatchRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub price: Option<PriceInput>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TryFrom<ProductPatchRequest> for ProductUpdate {
    type Error = ValidationError;

    fn try_from(request: ProductPatchRequest) -> Result<Self, Self::Error> {
        ProductUpdate::new(
            request.name.as_deref(),
            request.price.as_ref().map(PriceInput::as_str),
        )
    }
}

/// Price text as submitted. Accepts `"12.50"` as well as `12.5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PriceInput(String);

impl PriceInput {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PriceInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = PriceInput;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a decimal string or number")
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<PriceInput, E> {
        Ok(PriceInput(value.to_owned()))
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<PriceInput, E> {
        Ok(PriceInput(value.to_string()))
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<PriceInput, E> {
        Ok(PriceInput(value.to_string()))
    }

    fn visit_f64<E: DeError>(self, value: f64) -> Result<PriceInput, E> {
        Ok(PriceInput(value.to_string()))
    }
}

/// Read the request body as JSON.
///
/// A body that cannot be read or is not JSON is rejected with `data: null`.
pub(crate) async fn read_json(req: &mut Request) -> Result<Value, ProductsError> {
    let payload = req.payload().await.map_err(|source| {
        warn!("failed to read request body: {source}");

        ProductsError::invalid("request body could not be read", Some(Value::Null))
    })?;

    serde_json::from_slice(payload).map_err(|source| {
        ProductsError::invalid(
            format!("request body is not valid JSON: {source}"),
            Some(Value::Null),
        )
    })
}

/// Deserialize an already-read body, echoing it back on failure.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Value) -> Result<T, ProductsError> {
    T::deserialize(body)
        .map_err(|source| ProductsError::invalid(source.to_string(), Some(body.clone())))
}

/// Parse a path id. Anything that is not an integer cannot name a product.
pub(crate) fn parse_id(raw: &str, data: Option<&Value>) -> Result<ProductId, ProductsError> {
    raw.trim()
        .parse::<ProductId>()
        .map_err(|_ignored| ProductsError::not_found(data.cloned()))
}
