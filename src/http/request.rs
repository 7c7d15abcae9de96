//! Request-scoped concerns: request IDs, trace spans and request metrics.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (`x-request-id`, UUID v4)
//! - A caller-supplied ID is kept and echoed back on the response
//! - Metrics are labelled with the matched route template, not the raw path

use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::Span;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID from headers, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span for a single request, tagged with its request ID.
pub fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request.headers()),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Count the request and record its outcome.
pub async fn track_requests(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    state.request_count.fetch_add(1, Ordering::Relaxed);
    let response = next.run(request).await;

    metrics::record_request(&endpoint, response.status().as_u16(), start);
    tracing::debug!(
        endpoint = %endpoint,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
