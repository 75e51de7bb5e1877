// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keyed boolean storage for restoring switch state across reboots.
//!
//! A switch only needs two operations from its storage: load the boolean
//! saved under its key, and save a new one. [`PreferenceStore`] captures that
//! contract and is injected into each switch at construction, so tests and
//! hosts can choose a backend:
//!
//! - [`MemoryStore`] - volatile in-process map, useful for tests and simulation
//! - [`JsonFileStore`] - a single JSON document on disk

mod json_file;
mod memory;

use std::fmt;
use std::sync::Arc;

use crate::error::PersistenceError;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Key under which a switch's state is persisted.
///
/// Derived from the entity name by [`EntityInfo`](crate::entity::EntityInfo);
/// each key is owned by exactly one switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreferenceKey(u32);

impl PreferenceKey {
    /// Wraps a raw 32-bit key.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Storage backend for persisted switch state.
///
/// Implementations must be cheap to call from the publish path. The switch
/// never propagates errors returned here: a failed load falls back to the
/// restore mode's default and a failed save is logged and ignored.
pub trait PreferenceStore: Send + Sync {
    /// Loads the value saved under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: PreferenceKey) -> Result<Option<bool>, PersistenceError>;

    /// Saves `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, key: PreferenceKey, value: bool) -> Result<(), PersistenceError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load(&self, key: PreferenceKey) -> Result<Option<bool>, PersistenceError> {
        (**self).load(key)
    }

    fn save(&self, key: PreferenceKey, value: bool) -> Result<(), PersistenceError> {
        (**self).save(key, value)
    }
}
