// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory preference store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::{PreferenceKey, PreferenceStore};
use crate::error::PersistenceError;

/// Volatile [`PreferenceStore`] backed by a map.
///
/// Values live as long as the store. Load and save calls are counted so
/// callers can check how often a switch touched storage.
///
/// # Examples
///
/// ```
/// use switch_entity::persistence::{MemoryStore, PreferenceKey, PreferenceStore};
///
/// let key = PreferenceKey::new(1);
/// let store = MemoryStore::new().with_value(key, true);
///
/// assert_eq!(store.load(key).unwrap(), Some(true));
/// assert_eq!(store.load_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<PreferenceKey, bool>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a value, without counting it as a save.
    #[must_use]
    pub fn with_value(self, key: PreferenceKey, value: bool) -> Self {
        self.values.write().insert(key, value);
        self
    }

    /// Returns the stored value without counting a load.
    #[must_use]
    pub fn get(&self, key: PreferenceKey) -> Option<bool> {
        self.values.read().get(&key).copied()
    }

    /// Number of [`load`](PreferenceStore::load) calls made so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of [`save`](PreferenceStore::save) calls made so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: PreferenceKey) -> Result<Option<bool>, PersistenceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.get(key))
    }

    fn save(&self, key: PreferenceKey, value: bool) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.values.write().insert(key, value);
        Ok(())
    }
}
