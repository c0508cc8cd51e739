use crate::storage::KeyValueStore;
use crate::storage::error::StorageError;
use crate::types::StorageKey;
use std::collections::HashMap;

/// In-process store. Can be marked unavailable to simulate a browser that
/// refuses storage access (private mode, quota exceeded).
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<StorageKey, String>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            available: false,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "memory store is disabled".to_string(),
            ))
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.entries.insert(key.clone(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StorageError> {
        self.check_available()?;
        self.entries.remove(key);
        Ok(())
    }
}
