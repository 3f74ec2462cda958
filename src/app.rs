//! App shell
//!
//! Owns the session store and the navigator, and applies the app-wide
//! conventions around them: a restored session re-validates the current page,
//! a successful sign-in lands on `Search`, and an auth failure seen by any
//! controller signs the user out.

use crate::gateway::AuthSession;
use crate::navigation::{menu, MenuEntry, Navigator, Page};
use crate::pages::Applied;
use crate::session::{Session, SessionResult, SessionStorage, SessionStore};

pub struct Shell<S: SessionStorage> {
    session: SessionStore<S>,
    navigator: Navigator,
}

impl<S: SessionStorage> Shell<S> {
    pub fn new(storage: S) -> Self {
        Self {
            session: SessionStore::new(storage),
            navigator: Navigator::new(),
        }
    }

    /// Restore any persisted session and settle on a page
    pub fn start(&mut self) -> &Page {
        self.session.restore();
        self.navigator.revalidate(self.session.current())
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn page(&self) -> &Page {
        self.navigator.current()
    }

    pub fn navigate(&mut self, requested: Page) -> &Page {
        self.navigator.navigate(requested, self.session.current())
    }

    pub fn menu(&self) -> Vec<MenuEntry> {
        menu(self.session.is_authenticated())
    }

    /// Adopt the session returned by login or registration and go to `Search`.
    ///
    /// A persistence failure leaves the session active for this run only; it
    /// is returned for the caller to surface.
    pub fn sign_in(&mut self, auth: AuthSession) -> SessionResult<()> {
        let persisted = self.session.establish(auth.user, auth.token);
        self.navigator.navigate(Page::Search, self.session.current());
        persisted
    }

    pub fn logout(&mut self) -> SessionResult<()> {
        self.session.clear(&mut self.navigator)
    }

    /// React to a controller outcome. Returns `true` if the session was ended.
    pub fn observe(&mut self, applied: Applied) -> bool {
        if applied != Applied::SessionExpired || !self.session.is_authenticated() {
            return false;
        }

        tracing::info!("Backend rejected the session token, signing out");
        // Removal failures are logged by the store; the in-memory session is gone either way
        let _ = self.logout();
        true
    }

    pub fn into_storage(self) -> S {
        self.session.into_storage()
    }
}
