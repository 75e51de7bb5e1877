// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for switch state observers.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Ordered registry storing and dispatching callbacks

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a subscription.
///
/// Returned when registering an observer; IDs are unique within a registry's
/// lifetime and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Observer of logical switch state.
type StateCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Registry of state observers, dispatched in registration order.
///
/// Fan-out order is registration order, including after removals.
///
/// # Thread Safety
///
/// Registration and dispatch may happen from any thread. Dispatch snapshots
/// the callback list and releases the lock before calling out, so callbacks
/// may register further observers without deadlocking. An observer added
/// during a dispatch is first called on the next one.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    callbacks: RwLock<Vec<(SubscriptionId, StateCallback)>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(Vec::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Appends a callback and returns its subscription ID.
    pub fn add<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.callbacks.write().push((id, Arc::new(callback)));
        id
    }

    /// Removes a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed. The relative order
    /// of the remaining callbacks is unchanged.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.write();
        match callbacks.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                callbacks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Calls every callback with `state`, in registration order.
    ///
    /// A panicking callback unwinds out of this call and the callbacks after
    /// it are skipped for this dispatch.
    pub fn dispatch(&self, state: bool) {
        let snapshot: Vec<StateCallback> = self
            .callbacks
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(state);
        }
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.len())
            .finish()
    }
}
