//! Durable key-value store backed by redb.
//!
//! A single table maps `StorageKey → &str`. Every operation runs in its own
//! transaction, so concurrent writers resolve as last write wins.

use crate::storage::KeyValueStore;
use crate::storage::error::StorageError;
use crate::types::{Config, StorageKey};
use redb::{ReadableDatabase, TableDefinition};
use tracing::debug;

/// Main table: StorageKey → raw value
const ENTRIES_TABLE: TableDefinition<StorageKey, &str> = TableDefinition::new("entries");

pub struct RedbStore {
    db: redb::Database,
}

impl RedbStore {
    /// Creates or opens the database at `config.db_path()`.
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ENTRIES_TABLE)?;
        }
        write_txn.commit()?;

        debug!(path = %config.db_path().display(), "opened consent database");
        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENTRIES_TABLE)?;

        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&mut self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
