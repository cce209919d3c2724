//! Request correlation for the board's HTTP stack.
//!
//! `tower-http` assigns the ID: an `x-request-id` from the upstream proxy is
//! kept, otherwise a UUID is generated, and the same value is copied onto the
//! response. This module only reads the ID back out so the request span and
//! the Sentry scope carry it.

use axum::extract::Request;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Layer that fills in a missing `x-request-id` with a UUID.
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer that echoes the request's `x-request-id` on the response.
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// The request's ID, if it has a non-empty UTF-8 one.
#[must_use]
pub fn request_id(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
}

/// Span for one board request, tagged with its method, URI and request ID.
///
/// Also tags the Sentry scope so captured store and asset errors can be
/// matched to the access log.
pub fn request_span(request: &Request) -> Span {
    let id = request_id(request).unwrap_or_default();

    if !id.is_empty() {
        sentry::configure_scope(|scope| scope.set_tag("request_id", id));
    }

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %id,
    )
}
