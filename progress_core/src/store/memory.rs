//! In-process storage backend.

use std::collections::HashMap;

use super::StorageBackend;
use crate::error::StoreError;

/// Storage held in memory, with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, like browser local
/// storage does. The backend can also be switched off to simulate storage that
/// the user has disabled.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// None = unlimited.
    quota: Option<usize>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            quota: None,
            available: true,
        }
    }

    /// Create an empty store that holds at most `bytes` of keys and values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Enable or disable the backend. A disabled backend fails every call.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes used by every entry except `skip_key`.
    fn used_bytes(&self, skip_key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != skip_key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory storage disabled".to_string()))
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_bytes(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StoreError::QuotaExceeded { needed, available });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.entries.remove(key);
        Ok(())
    }
}
