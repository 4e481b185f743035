use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::clock::Clock;
use crate::config::RateLimitConfig;
use crate::handlers::{
    create_user, delete_user, get_user, health_handler, list_users, metrics_handler, route_not_found,
    update_user,
};
use crate::middleware::{admit, log_requests};
use crate::notify::NotificationSink;
use crate::rate_limit::RateLimiter;
use crate::service::UserService;
use crate::state::AppState;
use crate::store::InMemoryUserStore;

/// Wires the limiter, the in-memory store and the notification sink into shared state.
pub fn build_state(
    config: &RateLimitConfig,
    rate_limit_prefix: &str,
    clock: Arc<dyn Clock>,
    notifications: NotificationSink,
) -> Arc<AppState> {
    let rate_limiter = Arc::new(RateLimiter::with_clock(config, clock));
    let users = UserService::new(Arc::new(InMemoryUserStore::new()), notifications);
    Arc::new(AppState::new(rate_limiter, rate_limit_prefix, users))
}

// creating the router with routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/user", post(create_user).get(list_users))
        .route(
            "/api/user/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), admit))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serves until `shutdown` resolves. Peer addresses are recorded for admission control.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}
