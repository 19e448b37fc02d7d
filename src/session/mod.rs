//! The session marker: which user, if any, is signed in on this storage
//! profile. There is no token and no expiry; the marker is the session.

pub mod storage;

pub use storage::{FileStorage, LocalStorage, MemoryStorage};

use crate::{errors::AppError, users::UserId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the signed-in user's id.
pub const CURRENT_USER_KEY: &str = "currentUserId";

/// Explicit session context handed to every page.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn LocalStorage>,
}

impl Session {
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Id of the signed-in user. An empty or unreadable marker counts as absent.
    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        match self.storage.get_item(CURRENT_USER_KEY) {
            Ok(Some(value)) if !value.trim().is_empty() => Some(UserId::new(value)),
            Ok(_) => None,
            Err(err) => {
                warn!("Failed to read session marker: {err}");
                None
            }
        }
    }

    /// # Errors
    /// Returns `AppError::Storage` if the marker cannot be persisted.
    pub fn sign_in(&self, id: &UserId) -> Result<(), AppError> {
        self.storage.set_item(CURRENT_USER_KEY, id.as_str())?;
        debug!(user_id = %id, "session marker set");
        Ok(())
    }

    /// # Errors
    /// Returns `AppError::Storage` if the marker cannot be removed.
    pub fn sign_out(&self) -> Result<(), AppError> {
        self.storage.remove_item(CURRENT_USER_KEY)?;
        debug!("session marker cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("signed_in", &self.current_user_id().is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_absent_set_cleared() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        assert_eq!(session.current_user_id(), None);

        session.sign_in(&UserId::new("01hx")).unwrap();
        assert_eq!(session.current_user_id(), Some(UserId::new("01hx")));

        session.sign_out().unwrap();
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn empty_marker_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(CURRENT_USER_KEY, "").unwrap();
        let session = Session::new(storage);
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn marker_is_shared_through_storage() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let login_page = Session::new(Arc::clone(&storage));
        let welcome_page = Session::new(storage);

        login_page.sign_in(&UserId::new("3")).unwrap();
        assert_eq!(welcome_page.current_user_id(), Some(UserId::new("3")));
    }
}
