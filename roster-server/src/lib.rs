//! Roster HTTP Server - user CRUD over an in-memory store
//!
//! Every request passes through the same middleware chain, outermost
//! first: exception boundary, bearer-token authenticator, request logger.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use api::{ErrorResponse, MessageResponse};
pub use app::router;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, InternalFailure};
pub use state::AppState;
