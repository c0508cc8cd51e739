//! Consent persistence on top of a [`KeyValueStore`].

use crate::host::PageHost;
use crate::storage::KeyValueStore;
use crate::storage::error::StorageError;
use crate::types::{ConsentPreferences, ConsentRecord, StorageKey};
use error::ConsentError;
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ConsentError {
        #[error("Storage error: {0}")]
        Storage(#[from] StorageError),

        #[error("Serialize error: {0}")]
        Serialize(#[from] serde_json::Error),
    }
}

pub struct ConsentStore<S> {
    store: S,
    key: StorageKey,
}

impl<S: KeyValueStore> ConsentStore<S> {
    /// Uses the default `pylink_cookie_consent` slot.
    pub fn new(store: S) -> Self {
        Self::with_key(store, StorageKey::default())
    }

    pub fn with_key(store: S, key: StorageKey) -> Self {
        Self { store, key }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Read operations.
impl<S: KeyValueStore> ConsentStore<S> {
    /// Returns whether an unexpired, well-formed record is stored.
    ///
    /// Malformed and expired records are removed. Only storage failures
    /// are returned as errors.
    pub fn has_valid_consent(&mut self, now: SystemTime) -> Result<bool, ConsentError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no consent stored");
            return Ok(false);
        };

        match ConsentRecord::from_json(&raw) {
            Ok(record) if !record.is_expired(now) => Ok(true),
            Ok(record) => {
                info!(key = %self.key, expiry = record.expiry, "consent expired, purging");
                self.store.remove(&self.key)?;
                Ok(false)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "purging malformed consent record");
                self.store.remove(&self.key)?;
                Ok(false)
            }
        }
    }

    /// Returns the stored record without checking expiry.
    ///
    /// A malformed value reads as `None` and is left in place.
    pub fn get_consent(&self) -> Result<Option<ConsentRecord>, ConsentError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        match ConsentRecord::from_json(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored consent record is malformed");
                Ok(None)
            }
        }
    }
}

/// Write operations.
impl<S: KeyValueStore> ConsentStore<S> {
    /// Writes a fresh record valid for one year, replacing any previous one.
    pub fn save(
        &mut self,
        preferences: ConsentPreferences,
        now: SystemTime,
    ) -> Result<(), ConsentError> {
        let record = ConsentRecord::new(preferences, now);
        let json = record.to_json()?;

        self.store.set(&self.key, &json)?;

        info!(
            key = %self.key,
            mode = ?record.accepted_mode,
            analytics = record.analytics,
            marketing = record.marketing,
            "consent saved"
        );
        Ok(())
    }

    /// Removes the record, then asks `host` to reload the page.
    pub fn clear(&mut self, host: &mut impl PageHost) -> Result<(), ConsentError> {
        self.store.remove(&self.key)?;
        info!(key = %self.key, "consent cleared");

        host.reload();
        Ok(())
    }
}
