//! Multi-request flows through the served router.

use salvo::{
    Service,
    http::StatusCode,
    test::{ResponseExt, TestClient},
};
use serde_json::{Value, json};
use testresult::TestResult;

use crate::test_helpers::{InMemoryProducts, app_service};

const BASE: &str = "http://example.com";

async fn create(service: &Service, payload: &Value) -> TestResult<String> {
    let res = TestClient::post(format!("{BASE}/products"))
        .json(payload)
        .send(service)
        .await;

    assert_eq!(res.status_code, Some(StatusCode::CREATED));

    let location = res
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .ok_or("missing location header")?;

    Ok(location.to_owned())
}

async fn get_json(service: &Service, path: &str) -> TestResult<(Option<StatusCode>, Value)> {
    let mut res = TestClient::get(format!("{BASE}{path}")).send(service).await;
    let body = res.take_json().await?;

    Ok((res.status_code, body))
}

#[tokio::test]
async fn health_is_served() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    let (status, body) = get_json(&service, "/health").await?;

    assert_eq!(status, Some(StatusCode::OK));
    assert_eq!(body, json!({ "status": "healthy" }));

    Ok(())
}

#[tokio::test]
async fn created_product_can_be_fetched() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    let location = create(&service, &json!({ "name": " Widget ", "price": "12.50" })).await?;

    let (status, body) = get_json(&service, &location).await?;

    assert_eq!(status, Some(StatusCode::OK));
    assert_eq!(location, "/products/1");
    assert_eq!(body.pointer("/products/id"), Some(&json!(1)));
    assert_eq!(body.pointer("/products/name"), Some(&json!("Widget")));
    assert_eq!(body.pointer("/products/price"), Some(&json!("12.50")));

    Ok(())
}

#[tokio::test]
async fn rejected_create_persists_nothing() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    for payload in [
        json!({ "name": "Widget", "price": "0" }),
        json!({ "name": "Widget", "price": "-3" }),
        json!({ "name": "Widget", "price": "free" }),
        json!({ "name": "   ", "price": "1.00" }),
    ] {
        let res = TestClient::post(format!("{BASE}/products"))
            .json(&payload)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "{payload}");
    }

    let (_, body) = get_json(&service, "/products").await?;

    assert_eq!(body, json!({ "products": [] }));

    Ok(())
}

#[tokio::test]
async fn patch_changes_only_price() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    let location = create(&service, &json!({ "name": "Widget", "price": "12.50" })).await?;
    let (_, before) = get_json(&service, &location).await?;

    let mut res = TestClient::patch(format!("{BASE}{location}"))
        .json(&json!({ "price": "9.99" }))
        .send(&service)
        .await;

    let after: Value = res.take_json().await?;

    assert_eq!(res.status_code, Some(StatusCode::OK));
    assert_eq!(after.pointer("/product/name"), Some(&json!("Widget")));
    assert_eq!(after.pointer("/product/price"), Some(&json!("9.99")));
    assert_eq!(
        after.pointer("/product/created_at"),
        before.pointer("/products/created_at")
    );

    Ok(())
}

#[tokio::test]
async fn deleted_product_is_gone() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    let location = create(&service, &json!({ "name": "Widget", "price": "1.00" })).await?;

    let mut res = TestClient::delete(format!("{BASE}{location}"))
        .send(&service)
        .await;

    let deleted: Value = res.take_json().await?;

    assert_eq!(res.status_code, Some(StatusCode::OK));
    assert_eq!(deleted.pointer("/product/name"), Some(&json!("Widget")));

    let (status, body) = get_json(&service, &location).await?;

    assert_eq!(status, Some(StatusCode::BAD_REQUEST));
    assert_eq!(body, json!({ "message": "invalid 'id' field" }));

    Ok(())
}

#[tokio::test]
async fn list_is_ordered_by_id() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    for name in ["First", "Second", "Third"] {
        create(&service, &json!({ "name": name, "price": "1.00" })).await?;
    }

    let (_, body) = get_json(&service, "/products").await?;

    let names: Vec<&str> = body
        .get("products")
        .and_then(Value::as_array)
        .map(|products| {
            products
                .iter()
                .filter_map(|product| product.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    assert_eq!(names, ["First", "Second", "Third"]);

    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> TestResult {
    let service = app_service(InMemoryProducts::default());

    let res = TestClient::get(format!("{BASE}/products/999999"))
        .add_header("x-request-id", "flow-test", true)
        .send(&service)
        .await;

    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        res.headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok()),
        Some("flow-test")
    );

    Ok(())
}
