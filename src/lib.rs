// user management service with per-client rate limiting

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod rate_limit;
pub mod result;
pub mod service;
pub mod shutdown;
pub mod state;
pub mod store;
