//! In-memory user store
//!
//! Users live in an insertion-ordered `Vec` with an id index on the side.
//! Both structures sit behind one `RwLock` so they are always updated
//! together and id assignment cannot race.

use crate::error::{Result, RosterError};
use crate::types::{NewUser, User, UserId};
use crate::validation::{is_valid_email, is_valid_name};
use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Ordered users plus the id -> position index
#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    index: AHashMap<UserId, usize>,
}

impl Inner {
    fn position(&self, id: UserId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn next_id(&self) -> UserId {
        self.users.iter().map(|u| u.id).max().map_or(1, |max| max + 1)
    }
}

/// Thread-safe store of user records
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<Inner>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All users in insertion order
    pub fn list(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    /// Look up a user. Non-positive ids are rejected before the lookup.
    pub fn get(&self, id: UserId) -> Result<User> {
        if id <= 0 {
            return Err(RosterError::InvalidId(id));
        }

        let inner = self.inner.read();
        inner
            .position(id)
            .map(|pos| inner.users[pos].clone())
            .ok_or(RosterError::NotFound(id))
    }

    /// Validate and insert a new user, assigning the next id
    #[instrument(skip(self, fields))]
    pub fn create(&self, fields: NewUser) -> Result<User> {
        if !is_valid_name(&fields.name) {
            return Err(RosterError::NameRequired);
        }
        if !is_valid_email(&fields.email) {
            return Err(RosterError::InvalidEmail);
        }

        let mut inner = self.inner.write();
        let user = fields.with_id(inner.next_id());
        let pos = inner.users.len();
        inner.index.insert(user.id, pos);
        inner.users.push(user.clone());

        debug!(id = user.id, "user created");
        Ok(user)
    }

    /// Overwrite name and email of an existing user. The id never changes.
    #[instrument(skip(self, fields))]
    pub fn update(&self, id: UserId, fields: NewUser) -> Result<()> {
        let mut inner = self.inner.write();
        let pos = inner.position(id).ok_or(RosterError::NotFound(id))?;

        let user = &mut inner.users[pos];
        user.name = fields.name;
        user.email = fields.email;

        debug!(id, "user updated");
        Ok(())
    }

    /// Remove a user from both the ordered list and the index
    #[instrument(skip(self))]
    pub fn delete(&self, id: UserId) -> Result<()> {
        let mut inner = self.inner.write();
        let pos = inner.index.remove(&id).ok_or(RosterError::NotFound(id))?;
        inner.users.remove(pos);

        // Users after the removed one shifted left by one
        let Inner { users, index } = &mut *inner;
        for user in &users[pos..] {
            if let Some(slot) = index.get_mut(&user.id) {
                *slot -= 1;
            }
        }

        debug!(id, "user deleted");
        Ok(())
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    /// True if no users are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that the index and the ordered list describe the same users
    pub fn is_consistent(&self) -> bool {
        let inner = self.inner.read();
        inner.users.len() == inner.index.len()
            && inner
                .users
                .iter()
                .enumerate()
                .all(|(pos, user)| inner.index.get(&user.id) == Some(&pos))
    }
}
