//! Session storage backends
//!
//! The session is persisted as two string fields under fixed keys: `token`
//! and `user` (the serialized user record). Backends only ever write the two
//! fields together.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::SessionResult;

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user record
pub const USER_KEY: &str = "user";

/// Raw persisted fields. Either may be missing if storage was tampered with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedFields {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// Where the session survives process restarts
pub trait SessionStorage {
    /// Read whatever is persisted. Missing storage is an empty pair, not an error.
    fn load(&self) -> SessionResult<PersistedFields>;

    /// Persist both fields in a single commit
    fn store_pair(&mut self, token: &str, user: &str) -> SessionResult<()>;

    /// Remove both fields
    fn remove(&mut self) -> SessionResult<()>;
}

/// In-process storage, used by tests and ephemeral clients
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single raw key, bypassing the pair invariant. Useful to simulate
    /// storage edited by something other than this client.
    pub fn set_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> SessionResult<PersistedFields> {
        Ok(PersistedFields {
            token: self.entries.get(TOKEN_KEY).cloned(),
            user: self.entries.get(USER_KEY).cloned(),
        })
    }

    fn store_pair(&mut self, token: &str, user: &str) -> SessionResult<()> {
        self.entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.entries.insert(USER_KEY.to_string(), user.to_string());
        Ok(())
    }

    fn remove(&mut self) -> SessionResult<()> {
        self.entries.remove(TOKEN_KEY);
        self.entries.remove(USER_KEY);
        Ok(())
    }
}

/// JSON file storage: `{"token": "...", "user": "..."}`.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a crash mid-write never leaves one field without the other.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> SessionResult<PersistedFields> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedFields::default())
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn store_pair(&mut self, token: &str, user: &str) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let fields = PersistedFields {
            token: Some(token.to_string()),
            user: Some(user.to_string()),
        };
        let content = serde_json::to_string_pretty(&fields)?;

        let temp = self.temp_path();
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;

        tracing::debug!(path = ?self.path, "Session persisted");
        Ok(())
    }

    fn remove(&mut self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
