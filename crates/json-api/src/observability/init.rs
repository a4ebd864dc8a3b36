//! Startup and shutdown of the telemetry pipeline.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Owns the span exporter, if one was started, so it can be flushed on exit.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let telemetry = &config.telemetry;

        settings::apply(telemetry);

        let tracer_provider = telemetry
            .export_enabled
            .then(|| otel::build_tracer_provider(telemetry))
            .transpose()?;

        if tracer_provider.is_some() {
            global::set_text_map_propagator(TraceContextPropagator::new());
        }

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            otel_export = tracer_provider.is_some(),
            log_format = ?config.logging.log_format,
            "observability initialised"
        );

        Ok(Self { tracer_provider })
    }

    /// Flush buffered spans. A no-op when export is disabled.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to shut down tracer provider: {source}");
        }
    }
}
