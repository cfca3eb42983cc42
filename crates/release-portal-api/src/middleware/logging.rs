//! Request logging middleware

use std::time::{Duration, Instant};

use axum::{body::Body, http::Request, middleware::Next, response::Response};

const SLOW_REQUEST: Duration = Duration::from_millis(100);

/// Log method, URI, status and latency of every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::debug!(method = %method, uri = %uri, "Request");

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    if duration > SLOW_REQUEST {
        tracing::warn!(
            method = %method,
            uri = %uri,
            elapsed_ms = duration.as_millis() as u64,
            "Slow request"
        );
    }

    tracing::info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms = duration.as_millis() as u64,
        "Response"
    );

    response
}
