//! Session Store
//!
//! Holds the current identity and is the only component that reads or writes
//! persisted session state. A session is a user together with its bearer
//! token; one never exists without the other.

use crate::model::UserSnapshot;
use crate::navigation::Navigator;

use super::error::SessionResult;
use super::storage::SessionStorage;

/// An authenticated identity
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: UserSnapshot,
    token: String,
}

impl Session {
    pub fn new(user: UserSnapshot, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn user(&self) -> &UserSnapshot {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Current session plus the storage it is persisted to
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    current: Option<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// An empty store. Call [`restore`](Self::restore) to pick up a persisted session.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Load a previously persisted session.
    ///
    /// Populates the store only when both fields are present and the user
    /// record decodes; anything else leaves it empty. Never fails.
    pub fn restore(&mut self) -> bool {
        self.current = None;

        let fields = match self.storage.load() {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(error = %e, "Persisted session unreadable, starting signed out");
                return false;
            }
        };

        let (token, raw_user) = match (fields.token, fields.user) {
            (Some(token), Some(user)) if !token.is_empty() => (token, user),
            (None, None) => return false,
            _ => {
                tracing::warn!("Persisted session incomplete, starting signed out");
                return false;
            }
        };

        match serde_json::from_str::<UserSnapshot>(&raw_user) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Session restored");
                self.current = Some(Session { user, token });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted user record malformed, starting signed out");
                false
            }
        }
    }

    /// Start a session after a successful login or registration.
    ///
    /// The in-memory session is set even if persisting it fails; the error is
    /// returned so the caller can report that the session will not survive a
    /// restart.
    pub fn establish(&mut self, user: UserSnapshot, token: impl Into<String>) -> SessionResult<()> {
        let session = Session::new(user, token);
        let persisted = serde_json::to_string(session.user())
            .map_err(Into::into)
            .and_then(|user_json| self.storage.store_pair(session.token(), &user_json));

        tracing::info!(user_id = %session.user().id, "Session established");
        self.current = Some(session);

        if let Err(e) = &persisted {
            tracing::warn!(error = %e, "Failed to persist session");
        }
        persisted
    }

    /// End the session, forget the persisted fields and return to `Home`
    pub fn clear(&mut self, navigator: &mut Navigator) -> SessionResult<()> {
        self.current = None;
        navigator.reset();

        let removed = self.storage.remove();
        if let Err(e) = &removed {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
        tracing::info!("Session cleared");
        removed
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn user(&self) -> Option<&UserSnapshot> {
        self.current.as_ref().map(Session::user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(Session::token)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage back, e.g. to hand it to a fresh store after a restart
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Page;
    use crate::session::storage::{FileStorage, MemoryStorage, TOKEN_KEY, USER_KEY};
    use crate::test_support::{sample_session, sample_user};
    use tempfile::tempdir;

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_establish_then_restore_across_restart() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.establish(sample_user("u-1"), "tok-1").unwrap();
        let established = store.current().cloned();

        // Simulated restart: only the storage survives
        let mut restarted = SessionStore::new(store.into_storage());
        assert!(restarted.restore());
        assert_eq!(restarted.current().cloned(), established);
    }

    #[test]
    fn test_establish_then_restore_with_file_storage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::new(FileStorage::new(&path));
        store.establish(sample_user("u-7"), "tok-7").unwrap();

        let mut restarted = SessionStore::new(FileStorage::new(&path));
        assert!(restarted.restore());
        assert_eq!(restarted.current(), store.current());
    }

    #[test]
    fn test_establish_persists_both_fields() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.establish(sample_user("u-1"), "tok-1").unwrap();

        let storage = store.storage();
        assert_eq!(storage.get_raw(TOKEN_KEY), Some("tok-1"));
        let user: UserSnapshot = serde_json::from_str(storage.get_raw(USER_KEY).unwrap()).unwrap();
        assert_eq!(user.id, "u-1");
    }

    #[test]
    fn test_clear_empties_session_and_resets_navigation() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.establish(sample_user("u-1"), "tok-1").unwrap();

        let mut nav = Navigator::new();
        nav.navigate(Page::Applications, store.current());
        assert_eq!(nav.current(), &Page::Applications);

        store.clear(&mut nav).unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(nav.current(), &Page::Home);
        assert!(store.storage().is_empty());

        let mut restarted = SessionStore::new(store.into_storage());
        assert!(!restarted.restore());
    }

    #[test]
    fn test_clear_on_empty_store() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let mut nav = Navigator::new();
        nav.navigate(Page::Login, None);

        store.clear(&mut nav).unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(nav.current(), &Page::Home);
    }

    #[test]
    fn test_restore_ignores_partial_pairs() {
        let mut token_only = MemoryStorage::new();
        token_only.set_raw(TOKEN_KEY, "tok");
        let mut store = SessionStore::new(token_only);
        assert!(!store.restore());
        assert!(!store.is_authenticated());

        let user_json = serde_json::to_string(&sample_user("u-1")).unwrap();
        let mut user_only = MemoryStorage::new();
        user_only.set_raw(USER_KEY, &user_json);
        let mut store = SessionStore::new(user_only);
        assert!(!store.restore());
    }

    #[test]
    fn test_restore_ignores_malformed_user() {
        let mut storage = MemoryStorage::new();
        storage.set_raw(TOKEN_KEY, "tok");
        storage.set_raw(USER_KEY, "{\"id\": 42");

        let mut store = SessionStore::new(storage);
        assert!(!store.restore());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restore_ignores_unreadable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = SessionStore::new(FileStorage::new(&path));
        assert!(!store.restore());
    }

    #[test]
    fn test_session_accessors() {
        let session = sample_session();
        assert_eq!(session.token(), "tok-sample");
        assert_eq!(session.user().city, "London");
    }
}
