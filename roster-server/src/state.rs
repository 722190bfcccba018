//! Application state

use roster_core::{StaticTokenValidator, TokenValidator, UserStore};
use std::sync::Arc;

/// Application state shared across handlers and middleware
#[derive(Clone)]
pub struct AppState {
    /// The user store
    pub store: Arc<UserStore>,

    /// Bearer token check used by the authenticator
    pub tokens: Arc<dyn TokenValidator>,

    /// Include diagnostic detail in 500 responses
    pub expose_error_detail: bool,
}

impl AppState {
    /// Create application state with the static token validator
    pub fn new(store: Arc<UserStore>) -> Self {
        Self {
            store,
            tokens: Arc::new(StaticTokenValidator),
            expose_error_detail: false,
        }
    }

    /// Create application state, optionally exposing error detail
    pub fn with_error_detail(store: Arc<UserStore>, expose_error_detail: bool) -> Self {
        Self {
            expose_error_detail,
            ..Self::new(store)
        }
    }

    /// Replace the token validator
    pub fn with_token_validator(mut self, tokens: Arc<dyn TokenValidator>) -> Self {
        self.tokens = tokens;
        self
    }
}
