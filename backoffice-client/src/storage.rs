//! Bearer token persistence
//!
//! The token is the only piece of session state that survives a restart.
//! It is stored under a single well-known key.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// Key under which the token is persisted
pub const TOKEN_KEY: &str = "token";

/// Persistent storage for the bearer token
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> ClientResult<Option<String>>;
    fn save(&self, token: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// JSON file token store
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<StoredToken>(&json) {
            Ok(stored) if !stored.token.is_empty() => Ok(Some(stored.token)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable token file: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(&StoredToken {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory token store (tests, one-shot commands)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.token.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/session.json"));

        assert!(store.load().unwrap().is_none());
        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[TOKEN_KEY], "abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileTokenStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("t");
        assert_eq!(store.load().unwrap().as_deref(), Some("t"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
