//! Persisted token slots
//!
//! The backend hands out a short-lived access token and a longer-lived
//! refresh token; both survive process restarts under two fixed slot names.
//! Storage failures are logged and swallowed: losing a persisted token only
//! costs the user a re-login, it never fails an operation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Slot name for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Slot name for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Durable client-side storage for the token pair.
///
/// Only the session store reads or writes these slots.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and embedders with their own persistence.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .expect("token store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .expect("token store lock poisoned")
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.slots
            .lock()
            .expect("token store lock poisoned")
            .remove(key);
    }
}

/// File-backed store: a small JSON object, written through on every change.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    slots: Mutex<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = Self::load(&path);
        Self {
            path,
            slots: Mutex::new(slots),
        }
    }

    /// Open the store at the platform-default location.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Platform-default token file location.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "vidyasethu", "vidya")
            .map(|dirs| dirs.data_dir().join("tokens.json"))
            .unwrap_or_else(|| PathBuf::from("vidya-tokens.json"))
    }

    fn load(path: &Path) -> HashMap<String, String> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "token file unreadable; starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn flush(&self, slots: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %self.path.display(), error = %err, "could not create token directory");
                return;
            }
        }
        match serde_json::to_string(slots) {
            Ok(contents) => {
                if let Err(err) = fs::write(&self.path, contents) {
                    warn!(path = %self.path.display(), error = %err, "could not persist tokens");
                }
            }
            Err(err) => warn!(error = %err, "could not serialize tokens"),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .expect("token store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut slots = self.slots.lock().expect("token store lock poisoned");
        slots.insert(key.to_owned(), value.to_owned());
        self.flush(&slots);
    }

    fn remove(&self, key: &str) {
        let mut slots = self.slots.lock().expect("token store lock poisoned");
        if slots.remove(key).is_some() {
            self.flush(&slots);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        store.set(ACCESS_TOKEN_KEY, "acc-1");
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("acc-1".into()));
        store.remove(ACCESS_TOKEN_KEY);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = FileTokenStore::open(&path);
        store.set(ACCESS_TOKEN_KEY, "acc-1");
        store.set(REFRESH_TOKEN_KEY, "ref-1");
        drop(store);

        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY), Some("acc-1".into()));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY), Some("ref-1".into()));
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::open(dir.path().join("tokens.json"));
        store.set(REFRESH_TOKEN_KEY, "ref-1");
        store.remove(REFRESH_TOKEN_KEY);
        store.remove(REFRESH_TOKEN_KEY);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileTokenStore::open(&path);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    }
}
