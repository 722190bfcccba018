//! Validation helpers for user fields and bearer tokens

use crate::address::MailAddress;

/// The only bearer token accepted by [`StaticTokenValidator`]
pub const STATIC_TOKEN: &str = "valid-token";

/// Check that `email` is a bare, well-formed address.
///
/// The input must parse as a single mailbox and its canonical
/// `local@domain` form must equal the input byte for byte, so display names,
/// angle brackets and surrounding whitespace are all rejected.
pub fn is_valid_email(email: &str) -> bool {
    MailAddress::parse(email)
        .map(|addr| addr.address() == email)
        .unwrap_or(false)
}

/// Check that `name` contains at least one non-whitespace character
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Validates bearer tokens presented by clients
pub trait TokenValidator: Send + Sync {
    /// Returns true if the token grants access
    fn validate(&self, token: &str) -> bool;
}

/// Stub validator that accepts exactly [`STATIC_TOKEN`].
///
/// There is no expiry, signature or per-client identity here. Replace it
/// with a real [`TokenValidator`] before exposing the service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTokenValidator;

impl TokenValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> bool {
        token == STATIC_TOKEN
    }
}
