//! Liveness probe.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `healthy` while the process is serving requests
    pub status: String,
}

/// Reports that the process is up. Does not touch the database.
#[endpoint(tags("health"), summary = "Health check")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn health_reports_healthy() -> TestResult {
        let router = Router::new().push(Router::with_path("health").get(handler));

        let mut res = TestClient::get("http://example.com/health")
            .send(&Service::new(router))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, json!({ "status": "healthy" }));

        Ok(())
    }
}
