//! Error types for Roster

use crate::types::UserId;
use thiserror::Error;

/// Main error type for user store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Id is not a positive integer
    #[error("Invalid user ID.")]
    InvalidId(UserId),

    /// No user stored under this id
    #[error("User {0} not found")]
    NotFound(UserId),

    /// Name is empty or whitespace only
    #[error("Name is required.")]
    NameRequired,

    /// Email is not a bare, well-formed address
    #[error("Invalid email format.")]
    InvalidEmail,

    /// Mail address could not be parsed
    #[error("Address parse error: {0}")]
    AddressParse(String),
}

/// Result type alias for Roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
