//! Persistent store adapter - keeps the single progress record in device-local storage.
//!
//! Storage itself sits behind [`StorageBackend`], a plain string key/value interface.
//! [`ProgressStore`] layers the JSON encoding of [`UserProgress`] on top of it and
//! owns the fixed key the record lives under.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use quest_rules::UserProgress;

use crate::config::{TrackerConfig, DEFAULT_STORAGE_KEY};
use crate::error::StoreError;

/// A string key/value store, the shape of browser local storage.
pub trait StorageBackend {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value stored under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Reads and writes the progress record under one fixed key.
#[derive(Debug)]
pub struct ProgressStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> ProgressStore<B> {
    /// Create a store using the default key.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store using a custom key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Create a store using the key from the configuration.
    pub fn from_config(backend: B, config: &TrackerConfig) -> Self {
        Self::with_key(backend, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Read the stored record, reporting read and decode failures.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    pub fn try_load(&self) -> Result<Option<UserProgress>, StoreError> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read the stored record, falling back to the default record when nothing is
    /// stored or the stored value cannot be read or decoded.
    pub fn load(&self) -> UserProgress {
        match self.try_load() {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored progress, starting fresh");
                UserProgress::default()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored progress unreadable, starting fresh");
                UserProgress::default()
            }
        }
    }

    /// Serialize the whole record and overwrite the stored copy.
    pub fn save(&mut self, user: &UserProgress) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(user)?;
        self.backend.set(&self.key, &encoded)
    }

    /// Delete the stored record.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_empty_store_gives_default() {
        let store = ProgressStore::new(MemoryStorage::new());
        assert_eq!(store.load(), UserProgress::default());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        let mut user = UserProgress::default();
        user.add_experience(120);
        user.mark_lesson_complete("variables");

        store.save(&user).unwrap();
        assert_eq!(store.load(), user);
    }

    #[test]
    fn test_saves_under_fixed_key() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        store.save(&UserProgress::default()).unwrap();

        assert_eq!(store.key(), "java-quest-user");
        assert!(store.backend().get("java-quest-user").unwrap().is_some());
        assert_eq!(store.backend().len(), 1);
    }

    #[test]
    fn test_malformed_record_falls_back_to_default() {
        let mut backend = MemoryStorage::new();
        backend.set(DEFAULT_STORAGE_KEY, "{\"id\": 42, broken").unwrap();
        let store = ProgressStore::new(backend);

        assert!(matches!(store.try_load(), Err(StoreError::Json(_))));
        assert_eq!(store.load(), UserProgress::default());
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let mut backend = MemoryStorage::new();
        backend.set(DEFAULT_STORAGE_KEY, "[1, 2, 3]").unwrap();
        let store = ProgressStore::new(backend);

        assert_eq!(store.load(), UserProgress::default());
    }

    #[test]
    fn test_unavailable_backend_falls_back_to_default() {
        let mut backend = MemoryStorage::new();
        backend.set_available(false);
        let store = ProgressStore::new(backend);

        assert_eq!(store.load(), UserProgress::default());
    }

    #[test]
    fn test_save_of_loaded_record_leaves_storage_unchanged() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        let mut user = UserProgress::default();
        user.add_experience(340);
        user.mark_lesson_complete("variables");
        user.mark_lesson_complete("arrays");
        store.save(&user).unwrap();
        let before = store.backend().get(DEFAULT_STORAGE_KEY).unwrap();

        let loaded = store.load();
        store.save(&loaded).unwrap();

        let after = store.backend().get(DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_custom_key_from_config() {
        let config = TrackerConfig {
            storage_key: "second-profile".to_string(),
            ..Default::default()
        };
        let mut store = ProgressStore::from_config(MemoryStorage::new(), &config);
        store.save(&UserProgress::default()).unwrap();

        assert!(store.backend().get("second-profile").unwrap().is_some());
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        store.save(&UserProgress::default()).unwrap();
        store.clear().unwrap();
        assert!(store.try_load().unwrap().is_none());
    }
}
