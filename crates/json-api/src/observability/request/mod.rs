//! Per-request span, access log, request id and HTTP metrics.

mod ids;
mod propagation;
mod route;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, field::Empty, info, info_span, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let request_id = ids::resolve(req.header::<String>(ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    ids::echo(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = route::route_template(&path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        status = Empty,
        duration_ms = Empty,
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = propagation::remote_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach remote parent to request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    metrics::observe_request(&method, route, status.as_u16(), elapsed.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = status.as_u16(), %method, %path, "server error response");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), %method, %path, "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(%method, %path, duration_ms, threshold_ms, "slow request detected");
        }
    });
}
