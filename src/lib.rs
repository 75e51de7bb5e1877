// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch Entity - a toggleable binary actuator for device firmware.
//!
//! This library models the state side of a relay, GPIO load or any other
//! on/off actuator. It decides *what* the logical and physical state should
//! be and *what* should be remembered and announced; the hardware itself is
//! driven by a [`SwitchDriver`] you supply.
//!
//! # Features
//!
//! - **Inversion**: logical on can map to physical low for active-low hardware
//! - **Restore modes**: start off, on, or from the last persisted state
//! - **Deduplication**: repeated identical hardware reports are dropped
//! - **Observers**: callbacks notified in registration order on every change
//! - **Injected persistence**: any [`PreferenceStore`](persistence::PreferenceStore)
//!   backend, in-memory and JSON file stores included
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use switch_entity::persistence::MemoryStore;
//! use switch_entity::types::RestoreMode;
//! use switch_entity::{StatePublisher, Switch, SwitchDriver};
//!
//! struct Relay;
//!
//! impl SwitchDriver for Relay {
//!     fn write_state(&self, state: bool, publisher: &StatePublisher) {
//!         // drive the pin, then report what was reached
//!         publisher.publish_state(state);
//!     }
//! }
//!
//! # fn main() -> switch_entity::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let switch = Switch::builder("Garden Pump")
//!     .with_restore_mode(RestoreMode::RestoreDefaultOff)
//!     .with_store(Arc::clone(&store))
//!     .build(Relay)?;
//!
//! switch.add_observer(|state| println!("pump is now {}", if state { "on" } else { "off" }));
//!
//! switch.setup();
//! switch.toggle();
//! assert!(switch.state());
//! assert_eq!(store.get(switch.key()), Some(true));
//! # Ok(())
//! # }
//! ```
//!
//! # Asynchronous hardware
//!
//! Drivers whose hardware settles later can keep a clone of the
//! [`StatePublisher`] and report from another thread or task. Until then
//! the logical state stays at its previous value.

pub mod entity;
pub mod error;
pub mod output;
pub mod persistence;
mod restore;
pub mod subscription;
pub mod switch;
pub mod types;

pub use entity::EntityInfo;
pub use error::{ConfigError, Error, PersistenceError, Result, ValueError};
pub use output::{BinaryOutput, OutputSwitch};
pub use persistence::{JsonFileStore, MemoryStore, PreferenceKey, PreferenceStore};
pub use restore::resolve_initial_state;
pub use subscription::SubscriptionId;
pub use switch::{
    StatePublisher, Switch, SwitchBuilder, SwitchConfig, SwitchDriver, SwitchSnapshot,
};
pub use types::{PowerState, RestoreMode};
