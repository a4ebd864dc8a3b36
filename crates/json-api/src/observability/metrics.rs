//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 11] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

#[derive(Debug)]
struct HttpMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
}

impl HttpMetrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "catalog_json_http_requests_total",
                    "Total HTTP requests by method, route, status class and status code.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "catalog_json_http_request_duration_seconds",
                    "HTTP request latency in seconds by method and route.",
                )
                .buckets(LATENCY_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::new(
                "catalog_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            )?,
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
        })
    }
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

static HTTP_METRICS: OnceLock<Option<HttpMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static HttpMetrics> {
    HTTP_METRICS
        .get_or_init(|| {
            HttpMetrics::build()
                .inspect_err(|source| error!("failed to build HTTP metrics: {source}"))
                .ok()
        })
        .as_ref()
}

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    gauge: Option<&'static IntGauge>,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self { gauge }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.gauge {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
