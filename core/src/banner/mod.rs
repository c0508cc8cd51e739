//! Consent banner state and the actions bound to it.
//!
//! Actions are dispatched by identifier instead of matching button labels.

use crate::consent::ConsentStore;
use crate::consent::error::ConsentError;
use crate::host::PageHost;
use crate::storage::KeyValueStore;
use crate::types::ConsentPreferences;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use tracing::debug;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum BannerError {
        #[error("Unknown banner action: {0}")]
        UnknownAction(String),
    }
}

use error::BannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerAction {
    AcceptAll,
    Reject,
    SavePreferences,
    TogglePreferences,
    SetAnalytics(bool),
    SetMarketing(bool),
}

impl BannerAction {
    /// Identifier of a button action. Toggle switches have none.
    pub fn id(&self) -> Option<&'static str> {
        match self {
            BannerAction::AcceptAll => Some("accept-all"),
            BannerAction::Reject => Some("reject"),
            BannerAction::SavePreferences => Some("save-preferences"),
            BannerAction::TogglePreferences => Some("toggle-preferences"),
            BannerAction::SetAnalytics(_) | BannerAction::SetMarketing(_) => None,
        }
    }
}

impl FromStr for BannerAction {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "accept-all" => Ok(BannerAction::AcceptAll),
            "reject" => Ok(BannerAction::Reject),
            "save-preferences" => Ok(BannerAction::SavePreferences),
            "toggle-preferences" => Ok(BannerAction::TogglePreferences),
            other => Err(BannerError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for BannerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BannerAction::SetAnalytics(on) => write!(f, "analytics={on}"),
            BannerAction::SetMarketing(on) => write!(f, "marketing={on}"),
            action => write!(f, "{}", action.id().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerState {
    pub visible: bool,
    pub preferences_open: bool,
    /// Staged until `SavePreferences`.
    pub analytics: bool,
    /// Staged until `SavePreferences`.
    pub marketing: bool,
}

impl Default for BannerState {
    fn default() -> Self {
        Self {
            visible: true,
            preferences_open: false,
            analytics: false,
            marketing: false,
        }
    }
}

pub struct BannerController<S, H> {
    consent: ConsentStore<S>,
    host: H,
    state: BannerState,
}

impl<S: KeyValueStore, H: PageHost> BannerController<S, H> {
    pub fn new(consent: ConsentStore<S>, host: H) -> Self {
        Self {
            consent,
            host,
            state: BannerState::default(),
        }
    }

    pub fn state(&self) -> &BannerState {
        &self.state
    }

    pub fn consent(&self) -> &ConsentStore<S> {
        &self.consent
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Runs on page load and on every navigation event.
    ///
    /// Returns whether valid consent exists.
    pub fn on_page_load(&mut self, now: SystemTime) -> Result<bool, ConsentError> {
        let has_consent = self.consent.has_valid_consent(now)?;
        self.set_visible(!has_consent);
        Ok(has_consent)
    }

    pub fn dispatch(&mut self, action: BannerAction, now: SystemTime) -> Result<(), ConsentError> {
        debug!(%action, "banner action");

        match action {
            BannerAction::AcceptAll => self.decide(ConsentPreferences::accept_all(), now),
            BannerAction::Reject => self.decide(ConsentPreferences::essential_only(), now),
            BannerAction::SavePreferences => {
                let preferences =
                    ConsentPreferences::custom(self.state.analytics, self.state.marketing);
                self.decide(preferences, now)
            }
            BannerAction::TogglePreferences => {
                self.state.preferences_open = !self.state.preferences_open;
                Ok(())
            }
            BannerAction::SetAnalytics(on) => {
                self.state.analytics = on;
                Ok(())
            }
            BannerAction::SetMarketing(on) => {
                self.state.marketing = on;
                Ok(())
            }
        }
    }

    /// Removes stored consent and reloads the page.
    pub fn clear_consent(&mut self) -> Result<(), ConsentError> {
        self.consent.clear(&mut self.host)
    }

    pub fn into_parts(self) -> (ConsentStore<S>, H) {
        (self.consent, self.host)
    }

    fn decide(
        &mut self,
        preferences: ConsentPreferences,
        now: SystemTime,
    ) -> Result<(), ConsentError> {
        // Banner stays up if the write fails.
        self.consent.save(preferences, now)?;

        self.state.preferences_open = false;
        self.set_visible(false);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.visible = visible;
        self.host.set_banner_visible(visible);
    }
}

#[cfg(test)]
mod tests;
