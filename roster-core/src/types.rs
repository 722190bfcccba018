//! User record types

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier. Valid ids are strictly positive.
pub type UserId = i64;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned id, immutable once stored
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Mail address
    pub email: String,
}

/// Client-supplied user fields, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Mail address
    pub email: String,
}

impl NewUser {
    /// Create a new set of user fields
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        NewUser {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attach an id, producing a stored record
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
