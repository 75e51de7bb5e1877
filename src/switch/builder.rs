// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch builder.

use std::fmt;
use std::sync::Arc;

use super::{Switch, SwitchConfig};
use crate::entity::EntityInfo;
use crate::error::Error;
use crate::persistence::{MemoryStore, PreferenceStore};
use crate::types::RestoreMode;

/// Builder for creating switches.
///
/// Created with [`Switch::builder`] or from a parsed [`SwitchConfig`].
/// Without an explicit store the switch persists into a private
/// [`MemoryStore`], which does not survive the process.
///
/// # Examples
///
/// ```
/// use switch_entity::persistence::MemoryStore;
/// use switch_entity::types::RestoreMode;
/// use switch_entity::{Switch, switch::from_fn};
///
/// let switch = Switch::builder("Boiler")
///     .with_restore_mode(RestoreMode::AlwaysOff)
///     .with_device_class("switch")
///     .with_store(MemoryStore::new())
///     .build(from_fn(|_, _| {}))
///     .unwrap();
///
/// assert_eq!(switch.object_id(), "boiler");
/// assert_eq!(switch.device_class(), "switch");
/// ```
pub struct SwitchBuilder {
    name: String,
    inverted: bool,
    restore_mode: RestoreMode,
    device_class: Option<String>,
    store: Option<Arc<dyn PreferenceStore>>,
}

impl SwitchBuilder {
    /// Creates a builder for a switch named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inverted: false,
            restore_mode: RestoreMode::default(),
            device_class: None,
            store: None,
        }
    }

    /// Creates a builder carrying every setting from `config`.
    #[must_use]
    pub fn from_config(config: &SwitchConfig) -> Self {
        let builder = Self::new(config.name.clone())
            .with_inverted(config.inverted)
            .with_restore_mode(config.restore_mode);
        match &config.device_class {
            Some(device_class) => builder.with_device_class(device_class.clone()),
            None => builder,
        }
    }

    /// Sets hardware polarity inversion.
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Sets the boot-time restore mode.
    #[must_use]
    pub fn with_restore_mode(mut self, restore_mode: RestoreMode) -> Self {
        self.restore_mode = restore_mode;
        self
    }

    /// Sets the device class tag.
    #[must_use]
    pub fn with_device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = Some(device_class.into());
        self
    }

    /// Sets the store used to persist state.
    ///
    /// Pass an `Arc` to share one store between several switches.
    #[must_use]
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: PreferenceStore + 'static,
    {
        self.store = Some(Arc::new(store));
        self
    }

    /// Builds the switch with the given hardware driver.
    ///
    /// The switch starts with logical state off; call
    /// [`Switch::setup`] or [`Switch::restore_initial_state`] at boot.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyName`](crate::error::ValueError::EmptyName)
    /// if the name is empty.
    pub fn build<D>(self, driver: D) -> Result<Switch<D>, Error> {
        let info = EntityInfo::new(self.name)?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn PreferenceStore>);
        tracing::debug!(
            switch = %info,
            key = %info.key(),
            restore_mode = %self.restore_mode,
            "Created switch"
        );
        Ok(Switch::from_parts(
            info,
            self.inverted,
            self.restore_mode,
            self.device_class,
            store,
            driver,
        ))
    }
}

impl fmt::Debug for SwitchBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchBuilder")
            .field("name", &self.name)
            .field("inverted", &self.inverted)
            .field("restore_mode", &self.restore_mode)
            .field("device_class", &self.device_class)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::switch::from_fn;

    #[test]
    fn builder_defaults() {
        let switch = SwitchBuilder::new("Plain").build(()).unwrap();
        assert!(!switch.is_inverted());
        assert_eq!(switch.restore_mode(), RestoreMode::RestoreDefaultOff);
        assert_eq!(switch.device_class(), "");
    }

    #[test]
    fn builder_rejects_empty_name() {
        let result = SwitchBuilder::new("").build(from_fn(|_, _| {}));
        assert!(matches!(result, Err(Error::Value(ValueError::EmptyName))));
    }

    #[test]
    fn builder_from_config() {
        let config = SwitchConfig {
            name: "Heater".to_string(),
            inverted: true,
            restore_mode: RestoreMode::AlwaysOn,
            device_class: Some("outlet".to_string()),
        };

        let switch = SwitchBuilder::from_config(&config).build(()).unwrap();
        assert_eq!(switch.name(), "Heater");
        assert!(switch.is_inverted());
        assert_eq!(switch.restore_mode(), RestoreMode::AlwaysOn);
        assert_eq!(switch.device_class(), "outlet");
    }

    #[test]
    fn builder_debug() {
        let builder = SwitchBuilder::new("Fan").with_store(MemoryStore::new());
        let debug = format!("{builder:?}");
        assert!(debug.contains("Fan"));
        assert!(debug.contains("has_store: true"));
    }
}
