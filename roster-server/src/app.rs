//! Router construction

use crate::handlers;
use crate::middleware::{authenticate, exception_boundary, log_exchange, panic_responder};
use crate::state::AppState;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

/// Build the application: all routes behind the full middleware chain
pub fn router(state: AppState) -> Router {
    with_middleware(routes(), state)
}

/// Route table without middleware
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/api/test-exception", get(handlers::test_exception))
        .route("/metrics", get(handlers::metrics))
}

/// Wrap `routes` in the middleware chain and attach state.
///
/// Stages are listed outermost first: panic catcher and exception boundary,
/// then the authenticator, then the logger directly around the handlers.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let chain = ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(panic_responder(
            state.expose_error_detail,
        )))
        .layer(from_fn_with_state(state.clone(), exception_boundary))
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(from_fn(log_exchange));

    routes.layer(chain).with_state(state)
}
