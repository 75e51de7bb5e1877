// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative switch configuration.

use serde::{Deserialize, Serialize};

use super::SwitchBuilder;
use crate::error::{ConfigError, ValueError};
use crate::types::RestoreMode;

/// Configuration for one switch, as loaded from a device description.
///
/// Only `name` is required. `restore_mode` takes the firmware config names
/// (`RESTORE_DEFAULT_OFF`, `ALWAYS_ON`, ...), matched case-insensitively.
///
/// # Examples
///
/// ```
/// use switch_entity::switch::SwitchConfig;
/// use switch_entity::types::RestoreMode;
///
/// let config = SwitchConfig::from_json(r#"{
///     "name": "Irrigation Valve",
///     "inverted": true,
///     "restore_mode": "always off"
/// }"#).unwrap();
///
/// assert!(config.inverted);
/// assert_eq!(config.restore_mode, RestoreMode::AlwaysOff);
/// assert_eq!(config.device_class, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchConfig {
    /// Display name; the persistence key is derived from it.
    pub name: String,
    /// Hardware polarity inversion.
    #[serde(default)]
    pub inverted: bool,
    /// Boot-time restore policy.
    #[serde(default)]
    pub restore_mode: RestoreMode,
    /// Free-form classification tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
}

impl SwitchConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inverted: false,
            restore_mode: RestoreMode::default(),
            device_class: None,
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed, has unknown
    /// fields, or names an unknown restore mode, and [`ConfigError::Value`]
    /// if the name is blank.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a list of configurations from a JSON array.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_json`](Self::from_json), for any entry.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        let configs: Vec<Self> = serde_json::from_str(json)?;
        for config in &configs {
            config.validate()?;
        }
        Ok(configs)
    }

    /// Checks constraints the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyName`] if the name is blank.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.name.trim().is_empty() {
            return Err(ValueError::EmptyName);
        }
        Ok(())
    }

    /// Returns a builder carrying this configuration.
    #[must_use]
    pub fn builder(&self) -> SwitchBuilder {
        SwitchBuilder::from_config(self)
    }
}
