//! Session persistence in `window.localStorage`

use counterparty::session::{PersistedFields, TOKEN_KEY, USER_KEY};
use counterparty::{SessionError, SessionResult, SessionStorage};

/// Session storage under the `token` and `user` keys of the page origin
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> SessionResult<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| SessionError::Unavailable("no window".to_string()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        _ => Err(SessionError::Unavailable("localStorage disabled".to_string())),
    }
}

fn refused(op: &str) -> SessionError {
    SessionError::Unavailable(format!("localStorage refused {}", op))
}

/// The two string slots a session occupies
trait Slots {
    fn write(&self, key: &str, value: &str) -> bool;
    fn erase(&self, key: &str);
}

impl Slots for web_sys::Storage {
    fn write(&self, key: &str, value: &str) -> bool {
        self.set_item(key, value).is_ok()
    }

    fn erase(&self, key: &str) {
        let _ = self.remove_item(key);
    }
}

/// Write both slots or neither. A failed write also clears the previous pair.
fn commit_pair(slots: &impl Slots, token: &str, user: &str) -> SessionResult<()> {
    if slots.write(USER_KEY, user) && slots.write(TOKEN_KEY, token) {
        return Ok(());
    }
    slots.erase(TOKEN_KEY);
    slots.erase(USER_KEY);
    Err(refused("write"))
}

impl SessionStorage for LocalStorage {
    fn load(&self) -> SessionResult<PersistedFields> {
        let storage = storage()?;
        Ok(PersistedFields {
            token: storage.get_item(TOKEN_KEY).ok().flatten(),
            user: storage.get_item(USER_KEY).ok().flatten(),
        })
    }

    fn store_pair(&mut self, token: &str, user: &str) -> SessionResult<()> {
        commit_pair(&storage()?, token, user)
    }

    fn remove(&mut self) -> SessionResult<()> {
        let storage = storage()?;
        let token = storage.remove_item(TOKEN_KEY);
        let user = storage.remove_item(USER_KEY);
        token.and(user).map_err(|_| refused("remove"))
    }
}
