//! Product Errors
//!
//! Client mistakes and unknown ids both surface as `400` with a `message` and,
//! when the request carried a body, the submitted payload echoed as `data`.

use salvo::{
    Response,
    http::{StatusCode, StatusError},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    writing::{Json, Scribe},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use catalog_app::domain::products::{ProductsRepositoryError, ValidationError};

/// Error Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable reason
    pub message: String,

    /// The submitted payload, omitted for requests without a body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Object))]
    pub data: Option<Value>,
}

#[derive(Debug, Error)]
pub(crate) enum ProductsError {
    #[error("invalid 'id' field")]
    NotFound { data: Option<Value> },

    #[error("{message}")]
    Invalid {
        message: String,
        data: Option<Value>,
    },

    #[error("internal server error")]
    Internal,
}

impl ProductsError {
    pub(crate) fn not_found(data: Option<Value>) -> Self {
        Self::NotFound { data }
    }

    pub(crate) fn invalid(message: impl Into<String>, data: Option<Value>) -> Self {
        Self::Invalid {
            message: message.into(),
            data,
        }
    }

    pub(crate) fn validation(error: &ValidationError, data: Option<Value>) -> Self {
        Self::invalid(error.to_string(), data)
    }

    /// Classify a repository failure, logging anything that is not the
    /// client's fault.
    pub(crate) fn storage(error: ProductsRepositoryError, data: Option<Value>) -> Self {
        match error {
            ProductsRepositoryError::InvalidData | ProductsRepositoryError::MissingRequiredData => {
                Self::invalid(error.to_string(), data)
            }
            ProductsRepositoryError::Sql(source) => {
                error!("product storage failure: {source}");

                Self::Internal
            }
        }
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::Invalid { .. } => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_response(self) -> ErrorResponse {
        let message = self.to_string();

        let data = match self {
            Self::NotFound { data } | Self::Invalid { data, .. } => data,
            Self::Internal => None,
        };

        ErrorResponse { message, data }
    }
}

impl From<StatusError> for ProductsError {
    fn from(_error: StatusError) -> Self {
        Self::Internal
    }
}

impl Scribe for ProductsError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());
        res.render(Json(self.into_response()));
    }
}

impl EndpointOutRegister for ProductsError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = ErrorResponse::to_schema(components);

        operation.responses.insert(
            StatusCode::BAD_REQUEST.as_str(),
            oapi::Response::new("Invalid payload or unknown product id")
                .add_content("application/json", schema.clone()),
        );

        operation.responses.insert(
            StatusCode::INTERNAL_SERVER_ERROR.as_str(),
            oapi::Response::new("Internal Server Error").add_content("application/json", schema),
        );
    }
}
