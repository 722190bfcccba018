//! HTTP request handlers

use crate::api::GREETING;
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use roster_core::{NewUser, User, UserId};
use tracing::{debug, info};

/// Root greeting
pub async fn root() -> &'static str {
    GREETING
}

/// List all users in insertion order
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.list())
}

/// Fetch one user
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = path?;
    debug!(id, "Get user");

    Ok(Json(state.store.get(id)?))
}

/// Create a user, responding 201 with a Location header
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(fields) = payload?;
    let user = state.store.create(fields)?;

    metrics::record_mutation("create");
    metrics::update_user_count(state.store.len());
    info!(id = user.id, "Created user");

    let location = format!("/api/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Overwrite name and email of an existing user
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    let Json(fields) = payload?;
    state.store.update(id, fields)?;

    metrics::record_mutation("update");
    info!(id, "Updated user");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.store.delete(id)?;

    metrics::record_mutation("delete");
    metrics::update_user_count(state.store.len());
    info!(id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// Always fails, to exercise the exception boundary
pub async fn test_exception() -> ApiResult<()> {
    Err(ApiError::Internal(anyhow::anyhow!(
        "This is a test exception."
    )))
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    metrics::get_prometheus_metrics()
}
