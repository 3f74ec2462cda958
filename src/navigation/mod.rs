//! Page navigation
//!
//! A single state machine decides which page is rendered. Requests from UI
//! controls set the target directly; pages that need an identity resolve to
//! `Home` whenever no session is present. There is no history stack.

use crate::session::Session;

/// Every page the client can show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    Search,
    Applications,
    Profile,
    /// Another user's profile, keyed by user id
    UserDetail(String),
}

impl Page {
    /// Pages only reachable with a session
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Page::Search | Page::Applications | Page::Profile | Page::UserDetail(_)
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Login => "Login",
            Page::Register => "Register",
            Page::Search => "Search",
            Page::Applications => "My Applications",
            Page::Profile => "Profile",
            Page::UserDetail(_) => "User Profile",
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

/// Resolve a navigation request against session presence
pub fn resolve(requested: Page, session_present: bool) -> Page {
    if requested.requires_session() && !session_present {
        Page::Home
    } else {
        requested
    }
}

/// Holds the page currently on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Page,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Page {
        &self.current
    }

    /// Move to `requested`, or `Home` if it is gated and `session` is absent
    pub fn navigate(&mut self, requested: Page, session: Option<&Session>) -> &Page {
        let resolved = resolve(requested.clone(), session.is_some());
        if resolved != requested {
            tracing::debug!(requested = ?requested, "Gated page requested without a session");
        }
        self.current = resolved;
        &self.current
    }

    /// Re-apply the guard to the current page after the session changed
    pub fn revalidate(&mut self, session: Option<&Session>) -> &Page {
        let current = std::mem::take(&mut self.current);
        self.navigate(current, session)
    }

    /// Back to the default page
    pub fn reset(&mut self) {
        self.current = Page::Home;
    }
}

/// An entry in the header menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Go { page: Page, label: &'static str },
    Logout,
}

/// Header entries for the current session state
pub fn menu(session_present: bool) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::Go {
        page: Page::Home,
        label: "Home",
    }];

    if session_present {
        entries.push(MenuEntry::Go {
            page: Page::Search,
            label: "Search",
        });
        entries.push(MenuEntry::Go {
            page: Page::Applications,
            label: "My Applications",
        });
        entries.push(MenuEntry::Go {
            page: Page::Profile,
            label: "Profile",
        });
        entries.push(MenuEntry::Logout);
    } else {
        entries.push(MenuEntry::Go {
            page: Page::Login,
            label: "Login",
        });
        entries.push(MenuEntry::Go {
            page: Page::Register,
            label: "Register",
        });
    }

    entries
}
