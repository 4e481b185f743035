use axum::http::{Method, Uri};

use crate::error::{ApiError, ErrorCode};
use crate::messages;
use crate::pipeline::RequestFailure;

// unknown path, or known path with an unsupported method
pub async fn route_not_found(method: Method, uri: Uri) -> RequestFailure {
    let error = ApiError::not_found(messages::no_route(&method, uri.path()), ErrorCode::RouteNotFound);
    RequestFailure::new(error, uri.path())
}
