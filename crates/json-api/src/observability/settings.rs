//! Values the request middleware reads on every request.
//!
//! Written once during startup, before the server accepts connections.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::telemetry::TelemetryConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static PROPAGATE_PARENTS: AtomicBool = AtomicBool::new(false);

pub(super) fn apply(telemetry: &TelemetryConfig) {
    SLOW_REQUEST_THRESHOLD_MS.store(telemetry.slow_request_threshold_ms, Ordering::Relaxed);
    PROPAGATE_PARENTS.store(telemetry.propagates_parents(), Ordering::Relaxed);
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed)
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    PROPAGATE_PARENTS.load(Ordering::Relaxed)
}
