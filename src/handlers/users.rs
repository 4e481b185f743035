use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Failure;
use crate::messages;
use crate::models::{
    PageParams, PageResponse, UserCreateRequest, UserFilter, UserResponse, UserUpdateRequest,
    Validate,
};
use crate::pipeline::{AtPath, RequestFailure, ValidJson, query};
use crate::result::ApiResponse;
use crate::state::AppState;

type Handled<T> = Result<ApiResponse<T>, RequestFailure>;

fn parse_user_id(raw: &str, uri: &Uri) -> Result<Uuid, RequestFailure> {
    Uuid::parse_str(raw)
        .map_err(|_| Failure::invalid_field("userId", "must be a valid UUID"))
        .at(uri)
}

// POST /api/user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    ValidJson(details): ValidJson<UserCreateRequest>,
) -> Handled<UserResponse> {
    let user = state.users.create_user(details).at(&uri)?;
    Ok(ApiResponse::created(user, messages::USER_CREATED))
}

// GET /api/user/{userId}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(user_id): Path<String>,
) -> Handled<UserResponse> {
    let user_id = parse_user_id(&user_id, &uri)?;
    let user = state.users.get_user_by_id(user_id).at(&uri)?;
    Ok(ApiResponse::ok(user, messages::USER_RETRIEVED))
}

// GET /api/user?name=..&page=0&size=10
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    filter: Result<Query<UserFilter>, QueryRejection>,
    paging: Result<Query<PageParams>, QueryRejection>,
) -> Handled<PageResponse<UserResponse>> {
    let filter = query(filter, &uri)?;
    let paging = query(paging, &uri)?
        .validate()
        .map_err(Failure::Invalid)
        .at(&uri)?;

    let users = state
        .users
        .get_all(&filter, paging.page, paging.size)
        .at(&uri)?;
    Ok(ApiResponse::ok(users, messages::ALL_USERS_RETRIEVED))
}

// PUT /api/user/{userId}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(user_id): Path<String>,
    ValidJson(details): ValidJson<UserUpdateRequest>,
) -> Handled<UserResponse> {
    let user_id = parse_user_id(&user_id, &uri)?;
    let user = state.users.update_user(details, user_id).at(&uri)?;
    Ok(ApiResponse::ok(user, messages::USER_UPDATED))
}

// DELETE /api/user/{userId}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(user_id): Path<String>,
) -> Handled<()> {
    let user_id = parse_user_id(&user_id, &uri)?;
    state.users.delete_user_by_id(user_id).at(&uri)?;
    Ok(ApiResponse::message(messages::USER_DELETED))
}
