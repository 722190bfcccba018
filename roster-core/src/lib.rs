//! Roster Core - user records, validation and the in-memory user store
//!
//! This crate holds everything about users that does not depend on HTTP:
//! the record types, the mail address parser behind email validation,
//! the static bearer-token check and the synchronized store.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod address;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use address::MailAddress;
pub use error::{Result, RosterError};
pub use store::UserStore;
pub use types::{NewUser, User, UserId};
pub use validation::{
    is_valid_email, is_valid_name, StaticTokenValidator, TokenValidator, STATIC_TOKEN,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
