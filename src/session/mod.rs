//! Identity/session provider boundary
//!
//! The acting user's identity is supplied by an external provider (the
//! authentication layer in the original application). The ledger trusts the
//! supplied id but re-validates role and ban state inside every engine
//! operation, so a stale or forged identity cannot bypass the checks.
//!
//! The "current session identity" pointer lives here, outside the ledger's
//! transactional boundary: it is persisted alongside the collections but no
//! engine operation reads or writes it.

use crate::types::UserId;
use std::sync::{PoisonError, RwLock};

/// Holder of the current session identity pointer
///
/// Owned by the external identity provider; the ledger only persists it.
pub struct SessionStore {
    current: RwLock<Option<UserId>>,
}

impl SessionStore {
    /// Create a store with no active session
    pub fn new() -> Self {
        SessionStore {
            current: RwLock::new(None),
        }
    }

    /// Record the signed-in user
    pub fn set_current(&self, user_id: UserId) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(user_id);
    }

    /// The signed-in user, if any
    pub fn current(&self) -> Option<UserId> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear the session (sign out)
    pub fn clear(&self) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let session = SessionStore::new();
        assert_eq!(session.current(), None);

        session.set_current(7);
        assert_eq!(session.current(), Some(7));

        session.clear();
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_set_current_overwrites() {
        let session = SessionStore::new();
        session.set_current(1);
        session.set_current(2);
        assert_eq!(session.current(), Some(2));
    }
}
