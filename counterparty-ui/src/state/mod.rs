//! State Management
//!
//! The app shell and notice messages as Leptos signals, plus the browser
//! session storage.

pub mod global;
pub mod storage;

pub use global::{provide_global_state, AppShell, GlobalState};
pub use storage::LocalStorage;
