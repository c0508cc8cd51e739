//! The persisted consent decision.
//!
//! Stored as a JSON object:
//! `{essential, analytics, marketing, acceptedMode, timestamp, expiry}`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum RecordError {
        #[error("Malformed consent record: {0}")]
        Malformed(#[from] serde_json::Error),
    }
}

use error::RecordError;

/// How long a consent decision stays valid.
pub const CONSENT_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

const CONSENT_TTL_MILLIS: i64 = CONSENT_TTL.as_millis() as i64;

/// Which banner outcome produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptedMode {
    All,
    EssentialOnly,
    Custom,
}

/// The user's choices, as handed to [`ConsentStore::save`](crate::consent::ConsentStore::save).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentPreferences {
    pub analytics: bool,
    pub marketing: bool,
    pub accepted_mode: AcceptedMode,
}

impl ConsentPreferences {
    pub fn accept_all() -> Self {
        Self {
            analytics: true,
            marketing: true,
            accepted_mode: AcceptedMode::All,
        }
    }

    pub fn essential_only() -> Self {
        Self {
            analytics: false,
            marketing: false,
            accepted_mode: AcceptedMode::EssentialOnly,
        }
    }

    pub fn custom(analytics: bool, marketing: bool) -> Self {
        Self {
            analytics,
            marketing,
            accepted_mode: AcceptedMode::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    /// Essential cookies cannot be declined.
    #[serde(default = "default_true")]
    pub essential: bool,
    pub analytics: bool,
    pub marketing: bool,
    #[serde(alias = "accepted")]
    pub accepted_mode: AcceptedMode,
    /// Creation time, millisecond precision.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    /// Epoch milliseconds. The record is invalid at or after this instant.
    pub expiry: i64,
}

impl ConsentRecord {
    /// Builds the record written for `preferences` at `now`.
    pub fn new(preferences: ConsentPreferences, now: SystemTime) -> Self {
        let timestamp = DateTime::<Utc>::from(now).trunc_subsecs(3);

        Self {
            essential: true,
            analytics: preferences.analytics,
            marketing: preferences.marketing,
            accepted_mode: preferences.accepted_mode,
            timestamp,
            expiry: timestamp.timestamp_millis() + CONSENT_TTL_MILLIS,
        }
    }

    pub fn is_expired(&self, now: SystemTime) -> bool {
        epoch_millis(now) >= self.expiry
    }

    pub fn preferences(&self) -> ConsentPreferences {
        ConsentPreferences {
            analytics: self.analytics,
            marketing: self.marketing,
            accepted_mode: self.accepted_mode,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub(crate) fn epoch_millis(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}

fn default_true() -> bool {
    true
}

/// `2026-10-16T09:30:00.000Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
