//! Session management
//!
//! - **Store**: the current identity, single source of truth for "signed in"
//! - **Storage**: where the `token`/`user` pair survives restarts

mod error;
mod storage;
mod store;

pub use error::{SessionError, SessionResult};
pub use storage::{FileStorage, MemoryStorage, PersistedFields, SessionStorage, TOKEN_KEY, USER_KEY};
pub use store::{Session, SessionStore};
