//! Request middleware
//!
//! Layer order, outermost first: [`exception`] (panic catcher plus failure
//! translation), [`auth`], [`logging`]. [`crate::app::router`] wires them.

pub mod auth;
pub mod exception;
pub mod logging;

pub use auth::authenticate;
pub use exception::{exception_boundary, panic_responder};
pub use logging::{log_exchange, CapturedResponse};
