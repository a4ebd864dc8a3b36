//! W3C trace context extraction from incoming headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The remote parent carried by `traceparent`, if it names a valid span.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

        context
            .span()
            .span_context()
            .is_valid()
            .then_some(context)
    })
}

#[derive(Debug)]
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
