//! Global Application State
//!
//! Reactive state management using Leptos signals. The shell lives in one
//! signal so a sign-in, a logout or a navigation re-renders everything that
//! reads it.

use leptos::*;

use counterparty::{Applied, Page, Session, Shell, UserSnapshot};

use super::storage::LocalStorage;

pub type AppShell = Shell<LocalStorage>;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Session and current page
    pub shell: RwSignal<AppShell>,
    /// User picked from the search results, shown while their profile loads
    pub selected_user: RwSignal<Option<UserSnapshot>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for the notice banner)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let mut shell = Shell::new(LocalStorage);
    shell.start();

    let state = GlobalState {
        shell: create_rw_signal(shell),
        selected_user: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    pub fn page(&self) -> Page {
        self.shell.with(|shell| shell.page().clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.shell.with(|shell| shell.current_session().cloned())
    }

    pub fn is_signed_in(&self) -> bool {
        self.shell.with(|shell| shell.session().is_authenticated())
    }

    pub fn navigate(&self, page: Page) {
        self.shell.update(|shell| {
            shell.navigate(page);
        });
    }

    /// Open another user's profile
    pub fn open_user(&self, user: UserSnapshot) {
        let page = Page::UserDetail(user.id.clone());
        self.selected_user.set(Some(user));
        self.navigate(page);
    }

    pub fn logout(&self) {
        let mut outcome = Ok(());
        self.shell.update(|shell| outcome = shell.logout());
        match outcome {
            Ok(()) => self.show_success("Signed out"),
            Err(e) => self.show_error(&format!("Signed out, but {}", e)),
        }
    }

    /// Hand a controller outcome to the shell; an expired session signs out
    pub fn observe(&self, applied: Applied) {
        let mut ended = false;
        self.shell.update(|shell| ended = shell.observe(applied));
        if ended {
            self.show_error("Your session has expired. Please sign in again.");
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}
