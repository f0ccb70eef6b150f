//! Binder configuration.
//!
//! Every field defaults to the page contract in [`crate::consts`], so an
//! empty JSON object (`{}`) is a valid config.

use serde::Deserialize;

use crate::consts::{DEFAULT_EXPIRY_DAYS, DENSITY_COOKIE, DENSITY_PROPERTY, SELECTOR_ID};
use crate::error::ConfigError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Element id of the selection control.
    pub selector_id: String,
    /// Custom property written on the root element.
    pub property: String,
    /// Cookie the selection is persisted under.
    pub cookie_name: String,
    /// Cookie lifetime in days.
    pub expiry_days: i64,
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            selector_id: SELECTOR_ID.to_owned(),
            property: DENSITY_PROPERTY.to_owned(),
            cookie_name: DENSITY_COOKIE.to_owned(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl BinderConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed log level; unknown names fall back to `Info`.
    #[must_use]
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
