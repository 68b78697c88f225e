//! # Session Persistence
//!
//! Durable storage for the bearer token and the signed-in user, injected into
//! the [`HttpClient`](crate::framework::HttpClient) (to read the token) and the
//! [`AuthStore`](crate::auth_store::AuthStore) (to read and write both).
//!
//! Values live under two fixed keys, [`TOKEN_KEY`] and [`USER_KEY`]; the user
//! is stored as serialized JSON.

use crate::framework::error::SessionError;
use crate::model::User;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "currentUser";

/// Get/set/clear access to the persisted session.
///
/// Reads are infallible: a backend that cannot produce a value reports `None`.
pub trait SessionPersistence: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> Result<(), SessionError>;
    fn user(&self) -> Option<User>;
    fn set_user(&self, user: &User) -> Result<(), SessionError>;
    /// Removes both keys.
    fn clear(&self) -> Result<(), SessionError>;
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    // A poisoned map is still a valid map.
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn decode_user(raw: Option<&String>) -> Option<User> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable persisted user");
            None
        }
    }
}

/// In-process session storage. Cloning shares the same entries.
#[derive(Clone, Default)]
pub struct MemorySession {
    entries: Arc<Mutex<Entries>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored string for `key`, exactly as a durable backend would hold it.
    pub fn raw(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }
}

impl SessionPersistence for MemorySession {
    fn token(&self) -> Option<String> {
        self.raw(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        lock(&self.entries).insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn user(&self) -> Option<User> {
        decode_user(lock(&self.entries).get(USER_KEY))
    }

    fn set_user(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        lock(&self.entries).insert(USER_KEY.to_string(), raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        entries.remove(TOKEN_KEY);
        entries.remove(USER_KEY);
        Ok(())
    }
}

/// Session storage backed by a JSON object on disk.
///
/// The file is read once on [`FileSession::open`]; every write rewrites it.
pub struct FileSession {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileSession {
    /// Opens `path`, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Entries::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Entries::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &Entries) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionPersistence for FileSession {
    fn token(&self) -> Option<String> {
        lock(&self.entries).get(TOKEN_KEY).cloned()
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write(&entries)
    }

    fn user(&self) -> Option<User> {
        decode_user(lock(&self.entries).get(USER_KEY))
    }

    fn set_user(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        let mut entries = lock(&self.entries);
        entries.insert(USER_KEY.to_string(), raw);
        self.write(&entries)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        entries.remove(TOKEN_KEY);
        entries.remove(USER_KEY);
        self.write(&entries)
    }
}
