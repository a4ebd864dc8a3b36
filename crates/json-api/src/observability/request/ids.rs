//! `x-request-id` resolution.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuse the caller's id when one was sent, otherwise mint a UUIDv7.
pub(super) fn resolve(incoming: Option<String>) -> String {
    incoming
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn echo(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}
