//! API request and response types

use serde::{Deserialize, Serialize};

/// Body of the root endpoint
pub const GREETING: &str = "Hello World!";

/// Body with a single message, used for 401 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable message
    pub message: String,
}

impl MessageResponse {
    /// Create a message body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a 500 response produced by the exception boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub message: String,

    /// Diagnostic text (error chain and backtrace).
    /// Only present when error detail exposure is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
