//! Key-value storage capability the consent record is persisted in.
//!
//! Mirrors the browser's `localStorage`: string keys, string values,
//! synchronous, last write wins.

use crate::types::StorageKey;

pub(crate) mod db;
pub(crate) mod memory;

pub use db::RedbStore;
pub use memory::MemoryStore;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StorageError {
        #[error("Storage unavailable: {0}")]
        Unavailable(String),

        #[error("Database error: {0}")]
        Database(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        Table(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        Storage(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        Transaction(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        Commit(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

use error::StorageError;

pub trait KeyValueStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;

    /// Overwrites any existing value.
    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &StorageKey) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
