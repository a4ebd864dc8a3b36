//! Trace export and request instrumentation settings.

use std::time::Duration;

use clap::Args;

/// OpenTelemetry export and slow request settings.
#[derive(Debug, Args)]
pub struct TelemetryConfig {
    /// Export spans over OTLP
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED")]
    pub export_enabled: bool,

    /// Continue traces named by an incoming `traceparent` header
    #[arg(
        long = "otel-parent-propagation-enabled",
        env = "OTEL_PARENT_PROPAGATION_ENABLED"
    )]
    pub parent_propagation: bool,

    /// OTLP gRPC collector endpoint
    #[arg(
        long = "otel-exporter-otlp-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otlp_endpoint: String,

    /// OTLP export timeout, in seconds
    #[arg(
        long = "otel-exporter-otlp-timeout-seconds",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3
    )]
    pub otlp_timeout_seconds: u64,

    #[arg(
        long = "otel-service-name",
        env = "OTEL_SERVICE_NAME",
        default_value = "catalog-json"
    )]
    pub service_name: String,

    #[arg(
        long = "otel-service-version",
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub service_version: String,

    #[arg(
        long = "otel-deployment-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub deployment_environment: String,

    /// Fraction of root traces to sample; clamped to [0, 1]
    #[arg(
        long = "otel-trace-sample-ratio",
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value_t = 1.0
    )]
    pub trace_sample_ratio: f64,

    /// Requests slower than this are logged at `warn`
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

impl TelemetryConfig {
    #[must_use]
    pub fn otlp_timeout(&self) -> Duration {
        Duration::from_secs(self.otlp_timeout_seconds)
    }

    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        if self.trace_sample_ratio.is_nan() {
            return 1.0;
        }

        self.trace_sample_ratio.clamp(0.0, 1.0)
    }

    /// Remote parents only matter when spans leave the process.
    #[must_use]
    pub fn propagates_parents(&self) -> bool {
        self.export_enabled && self.parent_propagation
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        telemetry: TelemetryConfig,
    }

    fn parse(args: &[&str]) -> Result<TelemetryConfig, clap::Error> {
        Harness::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .map(|harness| harness.telemetry)
    }

    #[test]
    fn export_is_off_by_default() -> TestResult {
        let config = parse(&[])?;

        assert!(!config.export_enabled);
        assert!(!config.propagates_parents());
        assert_eq!(config.otlp_timeout(), Duration::from_secs(3));
        assert_eq!(config.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn parent_propagation_requires_export() -> TestResult {
        let config = parse(&["--otel-parent-propagation-enabled"])?;

        assert!(!config.propagates_parents());

        let config = parse(&["--otel-enabled", "--otel-parent-propagation-enabled"])?;

        assert!(config.propagates_parents());

        Ok(())
    }

    #[test]
    fn sample_ratio_is_clamped() -> TestResult {
        for (raw, expected) in [("-0.5", 0.0), ("0.25", 0.25), ("7", 1.0)] {
            let arg = format!("--otel-trace-sample-ratio={raw}");
            let config = parse(&[&arg])?;

            assert!(
                (config.sample_ratio() - expected).abs() < f64::EPSILON,
                "{raw} should clamp to {expected}"
            );
        }

        Ok(())
    }
}
