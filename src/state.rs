use std::sync::Arc;

use crate::rate_limit::RateLimiter;
use crate::service::UserService;

// app's shared state
pub struct AppState {
    pub rate_limiter: Arc<RateLimiter>,
    pub rate_limit_prefix: String, // paths under this prefix go through the limiter
    pub users: UserService,
}

impl AppState {
    pub fn new(
        rate_limiter: Arc<RateLimiter>,
        rate_limit_prefix: impl Into<String>,
        users: UserService,
    ) -> Self {
        Self {
            rate_limiter,
            rate_limit_prefix: rate_limit_prefix.into(),
            users,
        }
    }

    /// Whether requests to `path` must pass admission control.
    pub fn is_rate_limited(&self, path: &str) -> bool {
        let prefix = self.rate_limit_prefix.trim_end_matches('/');
        path == prefix || path.starts_with(&format!("{prefix}/"))
    }
}
