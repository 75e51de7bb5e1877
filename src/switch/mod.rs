// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The switch entity.
//!
//! A [`Switch`] tracks the logical on/off state of a binary actuator. It
//! never touches hardware itself: command methods compute the physical
//! target (taking inversion into account) and hand it to a
//! [`SwitchDriver`]; the driver reports what the hardware actually reached
//! through a [`StatePublisher`], and only then does the logical state change.
//!
//! # Publish pipeline
//!
//! Every report goes through the same steps, in order:
//!
//! 1. **Dedup** - a report equal to the previous report is dropped entirely
//! 2. **Inversion** - logical state becomes `physical != inverted`
//! 3. **Persist** - persistent restore modes save the logical state;
//!    storage failures are logged and ignored
//! 4. **Notify** - observers are called in registration order
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use switch_entity::persistence::MemoryStore;
//! use switch_entity::types::RestoreMode;
//! use switch_entity::{Switch, switch::from_fn};
//!
//! let store = Arc::new(MemoryStore::new());
//! let switch = Switch::builder("Porch Light")
//!     .with_inverted(true)
//!     .with_restore_mode(RestoreMode::RestoreDefaultOn)
//!     .with_store(Arc::clone(&store))
//!     .build(from_fn(|physical, publisher| publisher.publish_state(physical)))
//!     .unwrap();
//!
//! assert!(switch.setup());
//! assert!(switch.state());
//! assert_eq!(store.get(switch.key()), Some(true));
//! ```

mod builder;
mod config;
mod driver;

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::entity::EntityInfo;
use crate::persistence::{PreferenceKey, PreferenceStore};
use crate::restore::resolve_initial_state;
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::types::{PowerState, RestoreMode};

pub use builder::SwitchBuilder;
pub use config::SwitchConfig;
pub use driver::{FnDriver, StatePublisher, SwitchDriver, from_fn};

#[derive(Debug, Clone, Default)]
struct Settings {
    inverted: bool,
    restore_mode: RestoreMode,
    device_class: Option<String>,
}

#[derive(Debug, Default)]
struct Cursor {
    state: bool,
    last_published: Option<bool>,
    restored: bool,
}

/// State shared between a switch and the publishers handed to its driver.
pub(crate) struct Shared {
    info: EntityInfo,
    settings: RwLock<Settings>,
    cursor: Mutex<Cursor>,
    store: Arc<dyn PreferenceStore>,
    observers: CallbackRegistry,
}

impl Shared {
    fn publish_state(&self, physical: bool) {
        let (inverted, restore_mode) = {
            let settings = self.settings.read();
            (settings.inverted, settings.restore_mode)
        };

        let state = {
            let mut cursor = self.cursor.lock();
            if cursor.last_published == Some(physical) {
                tracing::trace!(switch = %self.info, physical, "Dropping duplicate state report");
                return;
            }
            cursor.last_published = Some(physical);
            cursor.state = physical != inverted;

            // Saved under the cursor lock so storage follows commit order.
            if restore_mode.is_persistent()
                && let Err(e) = self.store.save(self.info.key(), cursor.state)
            {
                tracing::warn!(switch = %self.info, error = %e, "Failed to persist switch state");
            }
            cursor.state
        };

        tracing::debug!(switch = %self.info, state = %PowerState::from(state), "Sending state");
        self.observers.dispatch(state);
    }

    fn load_persisted(&self, mode: RestoreMode) -> Option<bool> {
        if !mode.is_persistent() {
            return None;
        }
        match self.store.load(self.info.key()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(switch = %self.info, error = %e, "Failed to load persisted state, using default");
                None
            }
        }
    }

    fn restore_initial_state(&self) -> bool {
        let mode = self.settings.read().restore_mode;
        let mut cursor = self.cursor.lock();
        if cursor.restored {
            tracing::debug!(switch = %self.info, "Initial state already restored");
            return cursor.state;
        }

        let persisted = self.load_persisted(mode);
        cursor.state = resolve_initial_state(mode, persisted);
        cursor.restored = true;
        tracing::debug!(
            switch = %self.info,
            restore_mode = %mode,
            persisted = ?persisted,
            state = %PowerState::from(cursor.state),
            "Restored initial state"
        );
        cursor.state
    }
}

/// A toggleable binary actuator entity.
///
/// Holds configuration, the logical state, the dedup cursor, the observer
/// list, an injected [`PreferenceStore`], and the hardware driver `D`.
/// All methods take `&self`; the switch can be shared across threads behind
/// an `Arc` when its driver allows it.
///
/// Concurrent calls to [`publish_state`](Self::publish_state) are memory
/// safe, but their relative order is unspecified. Whichever report commits
/// last is also the one left in storage.
pub struct Switch<D> {
    shared: Arc<Shared>,
    driver: D,
}

impl Switch<()> {
    /// Starts building a switch named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SwitchBuilder {
        SwitchBuilder::new(name)
    }
}

impl<D> Switch<D> {
    pub(crate) fn from_parts(
        info: EntityInfo,
        inverted: bool,
        restore_mode: RestoreMode,
        device_class: Option<String>,
        store: Arc<dyn PreferenceStore>,
        driver: D,
    ) -> Self {
        let shared = Shared {
            info,
            settings: RwLock::new(Settings {
                inverted,
                restore_mode,
                device_class,
            }),
            cursor: Mutex::new(Cursor::default()),
            store,
            observers: CallbackRegistry::new(),
        };
        Self {
            shared: Arc::new(shared),
            driver,
        }
    }

    /// Returns the current logical state.
    #[must_use]
    pub fn state(&self) -> bool {
        self.shared.cursor.lock().state
    }

    /// Returns the current logical state as a [`PowerState`].
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        PowerState::from(self.state())
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.shared.info.name()
    }

    /// Returns the sanitized object id.
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.shared.info.object_id()
    }

    /// Returns the key this switch persists its state under.
    #[must_use]
    pub fn key(&self) -> PreferenceKey {
        self.shared.info.key()
    }

    /// Returns `true` if the physical state is the negation of the logical one.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.shared.settings.read().inverted
    }

    /// Sets hardware polarity inversion. Intended for use before setup.
    pub fn set_inverted(&self, inverted: bool) {
        self.shared.settings.write().inverted = inverted;
    }

    /// Returns the restore mode.
    #[must_use]
    pub fn restore_mode(&self) -> RestoreMode {
        self.shared.settings.read().restore_mode
    }

    /// Sets the restore mode. Intended for use before setup.
    pub fn set_restore_mode(&self, restore_mode: RestoreMode) {
        self.shared.settings.write().restore_mode = restore_mode;
    }

    /// Returns the device class, or an empty string when none is set.
    #[must_use]
    pub fn device_class(&self) -> String {
        self.shared
            .settings
            .read()
            .device_class
            .clone()
            .unwrap_or_default()
    }

    /// Sets the device class tag.
    pub fn set_device_class(&self, device_class: impl Into<String>) {
        self.shared.settings.write().device_class = Some(device_class.into());
    }

    /// Registers an observer of the logical state.
    ///
    /// Observers are called synchronously, in registration order, on every
    /// accepted state report.
    pub fn add_observer<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.shared.observers.add(callback)
    }

    /// Removes an observer. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.remove(id)
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.shared.observers.len()
    }

    /// Returns a handle for reporting achieved physical state.
    #[must_use]
    pub fn publisher(&self) -> StatePublisher {
        StatePublisher::new(Arc::clone(&self.shared))
    }

    /// Reports the physical state the hardware reached.
    ///
    /// See the [module documentation](self) for the pipeline this runs.
    pub fn publish_state(&self, state: bool) {
        self.shared.publish_state(state);
    }

    /// Resolves the boot-time state from the restore mode and storage, and
    /// makes it the logical state.
    ///
    /// Storage is only read for persistent restore modes; a missing or
    /// unreadable value selects the mode's default. Only the first call
    /// resolves: later calls return the current state untouched.
    pub fn restore_initial_state(&self) -> bool {
        self.shared.restore_initial_state()
    }

    /// Returns the hardware driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: SwitchDriver> Switch<D> {
    /// Commands the switch on.
    pub fn turn_on(&self) {
        tracing::debug!(switch = %self.shared.info, "Turning ON");
        self.write_state(!self.is_inverted());
    }

    /// Commands the switch off.
    pub fn turn_off(&self) {
        tracing::debug!(switch = %self.shared.info, "Turning OFF");
        self.write_state(self.is_inverted());
    }

    /// Commands the switch to the opposite of its current logical state.
    pub fn toggle(&self) {
        let state = self.state();
        tracing::debug!(
            switch = %self.shared.info,
            target = %PowerState::from(!state),
            "Toggling"
        );
        self.write_state(self.is_inverted() == state);
    }

    /// Restores the initial state and commands the driver to match it.
    ///
    /// Returns the restored logical state.
    pub fn setup(&self) -> bool {
        let initial = self.restore_initial_state();
        if initial {
            self.turn_on();
        } else {
            self.turn_off();
        }
        initial
    }

    /// Returns `true` if the driver cannot read back real hardware state.
    #[must_use]
    pub fn assumed_state(&self) -> bool {
        self.driver.assumed_state()
    }

    /// Captures the current state and configuration.
    #[must_use]
    pub fn snapshot(&self) -> SwitchSnapshot {
        let settings = self.shared.settings.read().clone();
        SwitchSnapshot {
            name: self.name().to_string(),
            object_id: self.object_id().to_string(),
            state: self.power_state(),
            inverted: settings.inverted,
            restore_mode: settings.restore_mode,
            device_class: settings.device_class,
            assumed_state: self.assumed_state(),
        }
    }

    /// Logs the switch configuration at `info` level.
    pub fn log_config(&self) {
        let settings = self.shared.settings.read().clone();
        tracing::info!(
            switch = %self.shared.info,
            object_id = self.object_id(),
            inverted = settings.inverted,
            restore_mode = %settings.restore_mode,
            device_class = settings.device_class.as_deref().unwrap_or(""),
            assumed_state = self.assumed_state(),
            "Switch config"
        );
    }

    fn write_state(&self, physical: bool) {
        let publisher = self.publisher();
        self.driver.write_state(physical, &publisher);
    }
}

impl<D> fmt::Debug for Switch<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.shared.settings.read();
        f.debug_struct("Switch")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("inverted", &settings.inverted)
            .field("restore_mode", &settings.restore_mode)
            .field("device_class", &settings.device_class)
            .field("observers", &self.observer_count())
            .finish_non_exhaustive()
    }
}

/// Point-in-time view of a switch, suitable for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSnapshot {
    /// Display name.
    pub name: String,
    /// Sanitized object id.
    pub object_id: String,
    /// Logical state.
    pub state: PowerState,
    /// Hardware polarity inversion.
    pub inverted: bool,
    /// Boot-time restore policy.
    pub restore_mode: RestoreMode,
    /// Free-form classification tag.
    pub device_class: Option<String>,
    /// Whether the state is assumed rather than read back.
    pub assumed_state: bool,
}
