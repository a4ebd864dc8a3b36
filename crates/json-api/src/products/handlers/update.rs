//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use catalog_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::ProductsError,
        get::ProductEnvelope,
        requests::{ProductPatchRequest, parse_body, parse_id, read_json},
    },
    state::State,
};

/// Product Update Handler
///
/// Checks the product exists, then applies the fields present in the body and
/// returns the stored product.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, req, depot),
    fields(
        product_id = %id.as_str(),
        name_changed = tracing::field::Empty,
        price_changed = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ProductsError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = read_json(req).await?;
    let product = parse_id(&id, Some(&body))?;

    // Unknown ids are reported ahead of any field errors.
    let existing = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(|error| ProductsError::storage(error, Some(body.clone())))?;

    if existing.is_none() {
        return Err(ProductsError::not_found(Some(body)));
    }

    let update = ProductUpdate::try_from(parse_body::<ProductPatchRequest>(&body)?)
        .map_err(|error| ProductsError::validation(&error, Some(body.clone())))?;

    let span = tracing::Span::current();

    span.record("name_changed", update.name.is_some());
    span.record("price_changed", update.price.is_some());

    let updated = state
        .app
        .products
        .update_product(product, update)
        .await
        .map_err(|error| ProductsError::storage(error, Some(body.clone())))?
        .ok_or_else(|| ProductsError::not_found(Some(body)))?;

    info!(product_id = %updated.id, "product updated");

    Ok(Json(ProductEnvelope {
        product: updated.into(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use catalog_app::domain::products::{MockProductsRepository, ProductId, ProductRecord};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsRepository) -> Service {
        products_service(repo, Router::with_path("products/{id}").patch(handler))
    }

    /// A mock holding product `id`, expecting only the existence check.
    fn existing_product_mock(id: i64) -> MockProductsRepository {
        let mut repo = MockProductsRepository::new();

        repo.expect_get_product()
            .once()
            .withf(move |product| *product == ProductId::from_i64(id))
            .return_once(move |_| Ok(Some(make_product(id))));

        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_delete_product().never();

        repo
    }

    #[tokio::test]
    async fn test_patch_price_only_leaves_name_untouched() -> TestResult {
        let updated_at = Timestamp::from_second(60)?;
        let mut repo = existing_product_mock(3);

        repo.expect_update_product()
            .once()
            .withf(|id, update| {
                *id == ProductId::from_i64(3)
                    && update.name.is_none()
                    && update.price.map(|price| price.into_decimal()) == Some(Decimal::new(999, 2))
            })
            .return_once(move |_, _| {
                Ok(Some(ProductRecord {
                    price: Decimal::new(999, 2),
                    updated_at,
                    ..make_product(3)
                }))
            });

        let mut res = TestClient::patch("http://example.com/products/3")
            .json(&json!({ "price": "9.99" }))
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body,
            json!({
                "product": {
                    "id": 3,
                    "name": "Widget",
                    "price": "9.99",
                    "created_at": "1970-01-01T00:00:00Z",
                    "updated_at": "1970-01-01T00:01:00Z",
                }
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_trims_name() -> TestResult {
        let mut repo = existing_product_mock(3);

        repo.expect_update_product()
            .once()
            .withf(|_, update| {
                update.name.as_ref().map(|name| name.as_str()) == Some("Gizmo")
                    && update.price.is_none()
            })
            .return_once(|_, _| Ok(Some(make_product(3))));

        let res = TestClient::patch("http://example.com/products/3")
            .json(&json!({ "name": "  Gizmo  " }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_invalid_price_returns_400_with_payload() -> TestResult {
        let mut repo = existing_product_mock(3);

        repo.expect_update_product().never();

        let payload = json!({ "price": "0" });

        let mut res = TestClient::patch("http://example.com/products/3")
            .json(&payload)
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            json!({ "message": "invalid 'price' field", "data": payload })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_unknown_product_returns_400() -> TestResult {
        let mut repo = MockProductsRepository::new();

        repo.expect_get_product().once().return_once(|_| Ok(None));

        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let payload = json!({ "name": "Gizmo" });

        let mut res = TestClient::patch("http://example.com/products/999999")
            .json(&payload)
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            json!({ "message": "invalid 'id' field", "data": payload })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_unknown_product_reported_before_invalid_fields() -> TestResult {
        let mut repo = MockProductsRepository::new();

        repo.expect_get_product()
            .once()
            .withf(|product| *product == ProductId::from_i64(999_999))
            .return_once(|_| Ok(None));

        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let payload = json!({ "price": "-1" });

        let mut res = TestClient::patch("http://example.com/products/999999")
            .json(&payload)
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            json!({ "message": "invalid 'id' field", "data": payload })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_product_deleted_before_update_returns_400() -> TestResult {
        let mut repo = existing_product_mock(3);

        repo.expect_update_product()
            .once()
            .return_once(|_, _| Ok(None));

        let mut res = TestClient::patch("http://example.com/products/3")
            .json(&json!({ "name": "Gizmo" }))
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.get("message"), Some(&json!("invalid 'id' field")));

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_rejects_null_fields() -> TestResult {
        let mut repo = existing_product_mock(3);

        repo.expect_update_product().never();

        let payload = json!({ "name": null, "price": null });

        let mut res = TestClient::patch("http://example.com/products/3")
            .json(&payload)
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.get("data"), Some(&payload));

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_rejects_unknown_fields() -> TestResult {
        let mut repo = existing_product_mock(3);

        repo.expect_update_product().never();

        let res = TestClient::patch("http://example.com/products/3")
            .json(&json!({ "id": 9 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_non_integer_id_skips_repository() -> TestResult {
        let mut repo = MockProductsRepository::new();

        repo.expect_list_products().never();
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let res = TestClient::patch("http://example.com/products/abc")
            .json(&json!({ "name": "Gizmo" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
