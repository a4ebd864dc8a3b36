//! Route templates for span names and metric labels.

/// Label for paths no route serves.
pub(super) const UNMATCHED_ROUTE: &str = "unmatched";

/// Map a request path onto the route that serves it.
///
/// Labels come from a fixed set so request paths never create new metric
/// series.
pub(super) fn route_template(path: &str) -> &'static str {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next(), segments.next()) {
        (None, _, _) => "/",
        (Some("health"), None, _) => "/health",
        (Some("products"), None, _) => "/products",
        (Some("products"), Some(_), None) => "/products/{id}",
        (Some("api-doc"), Some("openapi.json"), None) => "/api-doc/openapi.json",
        (Some("docs"), _, _) => "/docs",
        _ => UNMATCHED_ROUTE,
    }
}
