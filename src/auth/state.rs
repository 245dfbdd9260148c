//! Shared auth context: the identity resolved by a guard, readable by the
//! rest of the application shell. Only non-sensitive metadata lives here;
//! the token itself stays in the [`crate::SessionStore`].

use crate::auth::types::User;
use std::sync::{Arc, RwLock};

/// Clonable handle to the currently resolved identity.
#[derive(Clone, Default)]
pub struct AuthContext {
    identity: Arc<RwLock<Option<User>>>,
}

impl AuthContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the identity after a guard authorizes it.
    pub fn set_identity(&self, user: User) {
        *self.write() = Some(user);
    }

    /// Drop the identity, typically on logout.
    pub fn clear_identity(&self) {
        *self.write() = None;
    }

    #[must_use]
    pub fn identity(&self) -> Option<User> {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<User>> {
        self.identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("is_authenticated", &self.is_authenticated())
            .finish()
    }
}
