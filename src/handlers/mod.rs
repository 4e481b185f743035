mod fallback;
mod health;
mod metrics;
mod users;

pub use fallback::route_not_found;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use users::{create_user, delete_user, get_user, list_users, update_user};
