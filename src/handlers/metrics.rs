use axum::extract::State;
use axum::http::Uri;
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;

use crate::error::Failure;
use crate::metrics::TRACKED_CLIENTS;
use crate::pipeline::{AtPath, RequestFailure};
use crate::state::AppState;

// prometheus text exposition
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<String, RequestFailure> {
    // the sweeper only runs with eviction on, refresh on every scrape
    TRACKED_CLIENTS.set(state.rate_limiter.tracked_clients() as f64);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|err| Failure::Unexpected(err.to_string().into()))
        .at(&uri)?;
    String::from_utf8(buffer).map_err(Failure::unexpected).at(&uri)
}
