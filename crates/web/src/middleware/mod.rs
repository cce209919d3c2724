//! HTTP middleware stack for the message board.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. Set request ID (keep the proxy's `x-request-id` or generate one)
//! 3. `TraceLayer` (one span per request, tagged with the request ID)
//! 4. Propagate request ID (echo it on the response)
//! 5. Security headers

pub mod request_id;
pub mod security_headers;

pub use request_id::{
    REQUEST_ID_HEADER, propagate_request_id_layer, request_span, set_request_id_layer,
};
pub use security_headers::security_headers_middleware;
