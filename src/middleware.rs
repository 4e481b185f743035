use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::messages;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::state::AppState;

// Identity used when the connection carries no peer address
pub const UNKNOWN_CLIENT: &str = "unknown";

fn client_id(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Admission control. Rejected requests never reach a handler and get a
/// plain-text 429 instead of a result envelope.
pub async fn admit(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    if !state.is_rate_limited(req.uri().path()) {
        return next.run(req).await;
    }

    let client = client_id(&req);
    if !state.rate_limiter.allow(&client) {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(%client, path = %req.uri().path(), "rate limit exceeded");
        return (StatusCode::TOO_MANY_REQUESTS, messages::TOO_MANY_REQUESTS).into_response();
    }

    next.run(req).await
}

// Request logging - method, path, status and time taken
pub async fn log_requests(req: Request, next: Next) -> Response {
    REQUEST_TOTAL.inc();

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start_time = Instant::now();

    let response = next.run(req).await;

    let elapsed = start_time.elapsed();
    REQUEST_LATENCY.observe(elapsed.as_secs_f64());
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request completed"
    );

    response
}
