use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec,
    register_gauge, register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("user_service_requests_total", "Total number of requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "user_service_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref ERRORS_TOTAL: CounterVec = register_counter_vec!(
        "user_service_errors_total",
        "Failed requests by error kind",
        &["kind"]
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "user_service_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "user_service_tracked_clients",
        "Client identities currently holding a rate limit window"
    )
    .unwrap();
}
