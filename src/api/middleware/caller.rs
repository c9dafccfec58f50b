//! Caller identity middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;

use crate::config::{ANONYMOUS_CALLER, CALLER_ID_HEADER};

/// Identity of the caller as reported by the upstream gateway
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller(pub String);

impl Caller {
    fn from_request(request: &Request) -> Self {
        let id = request
            .headers()
            .get(CALLER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(ANONYMOUS_CALLER);

        Self(id.to_string())
    }
}

/// Wrap the rest of the request in a tracing span carrying the caller identity.
///
/// The identity only annotates logs; no access decisions are made.
pub async fn caller_middleware(request: Request, next: Next) -> Response {
    let caller = Caller::from_request(&request);
    let span = tracing::info_span!(
        "request",
        caller = %caller.0,
        method = %request.method(),
        path = %request.uri().path(),
    );

    next.run(request).instrument(span).await
}
