//! Session-wide identity slot.
//!
//! One store is built per session and cloned into every component that needs
//! it. Clones share the same slot, so a write made by the Entry controller is
//! visible to the Navigator and the page controllers immediately.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::domain::UserHandle;

/// Shared holder of the validated handle.
///
/// The store performs no validation. Callers must have confirmed the handle
/// through [`crate::domain::RecommendationClient`] before calling
/// [`IdentityStore::set`].
///
/// # Examples
/// ```
/// use recommender_frontend::domain::{IdentityStore, UserHandle};
///
/// let store = IdentityStore::new();
/// let reader = store.clone();
/// assert!(reader.get().is_none());
///
/// store.set(UserHandle::new("tourist").expect("non-blank"));
/// assert_eq!(reader.get().map(String::from).as_deref(), Some("tourist"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityStore {
    slot: Arc<RwLock<Option<UserHandle>>>,
}

impl IdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current handle, if one has been committed.
    pub fn get(&self) -> Option<UserHandle> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Commit `handle`, replacing any previous value.
    pub fn set(&self, handle: UserHandle) {
        info!(handle = %handle, "identity committed");
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Guard predicate: whether a handle has been committed.
    pub fn is_present(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
