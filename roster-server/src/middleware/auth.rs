//! Bearer-token authentication

use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Reject requests without a valid bearer token before anything downstream runs
pub async fn authenticate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let token = bearer_token(req.headers());
    let token_present = token.is_some();
    let authorized = token.is_some_and(|token| state.tokens.validate(token));

    if authorized {
        return next.run(req).await;
    }

    warn!(
        method = %req.method(),
        path = %req.uri().path(),
        token_present,
        "Rejected unauthenticated request"
    );
    metrics::record_auth_rejection();
    ApiError::Unauthorized.into_response()
}

/// Token from the `Authorization` header: its last whitespace-separated segment
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .last()
}
