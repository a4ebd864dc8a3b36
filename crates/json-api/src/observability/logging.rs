//! `tracing` subscriber assembly.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, logging::LogFormat};

use super::ObservabilityError;

/// Directives appended to the configured level so driver chatter stays out
/// of `debug` output.
const QUIET_DEPENDENCIES: [&str; 5] = [
    "h2=warn",
    "hyper=warn",
    "tonic=warn",
    "sqlx=warn",
    "opentelemetry=warn",
];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let fmt_layer = match config.logging.log_format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.telemetry.service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .with(env_filter(&config.logging.log_level))
        .try_init()?;

    Ok(())
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_ignored| EnvFilter::new(default_directives(log_level)))
}

fn default_directives(log_level: &str) -> String {
    std::iter::once(log_level)
        .chain(QUIET_DEPENDENCIES)
        .collect::<Vec<_>>()
        .join(",")
}
