pub(crate) mod config;
pub use config::{AppConfig, AppConfigError, Config, ConsentConfig, LoggingConfig};

pub(crate) mod key;
pub use key::{DEFAULT_STORAGE_KEY, MAX_STORAGE_KEY_LENGTH, StorageKey, StorageKeyError};

pub(crate) mod record;
pub use record::error::RecordError;
pub use record::{AcceptedMode, CONSENT_TTL, ConsentPreferences, ConsentRecord};
