// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware driver capability and the handle drivers report through.

use std::fmt;
use std::sync::Arc;

use super::Shared;

/// Capability every concrete switch driver supplies.
///
/// The switch calls [`write_state`](Self::write_state) from its command
/// methods with the *physical* target state, already adjusted for inversion.
/// The driver actuates hardware and, once the state is achieved, reports it
/// through the given [`StatePublisher`]. Reporting may happen inside
/// `write_state` or later from another thread or task; the publisher can be
/// cloned and kept.
///
/// # Examples
///
/// ```
/// use switch_entity::{StatePublisher, Switch, SwitchDriver};
///
/// struct Relay;
///
/// impl SwitchDriver for Relay {
///     fn write_state(&self, state: bool, publisher: &StatePublisher) {
///         // energize or release the coil here
///         publisher.publish_state(state);
///     }
/// }
///
/// let switch = Switch::builder("Relay").build(Relay).unwrap();
/// switch.turn_on();
/// assert!(switch.state());
/// ```
pub trait SwitchDriver {
    /// Commands the hardware towards `state` (physical polarity).
    fn write_state(&self, state: bool, publisher: &StatePublisher);

    /// Returns `true` if the hardware cannot report its real state, so the
    /// published state is only assumed from the last command.
    fn assumed_state(&self) -> bool {
        false
    }
}

impl<T: SwitchDriver + ?Sized> SwitchDriver for Arc<T> {
    fn write_state(&self, state: bool, publisher: &StatePublisher) {
        (**self).write_state(state, publisher);
    }

    fn assumed_state(&self) -> bool {
        (**self).assumed_state()
    }
}

impl<T: SwitchDriver + ?Sized> SwitchDriver for Box<T> {
    fn write_state(&self, state: bool, publisher: &StatePublisher) {
        (**self).write_state(state, publisher);
    }

    fn assumed_state(&self) -> bool {
        (**self).assumed_state()
    }
}

/// Driver built from a closure, see [`from_fn`].
pub struct FnDriver<F> {
    write: F,
    assumed_state: bool,
}

impl<F> FnDriver<F> {
    /// Marks the driver as unable to read back hardware state.
    #[must_use]
    pub fn with_assumed_state(mut self) -> Self {
        self.assumed_state = true;
        self
    }
}

impl<F> fmt::Debug for FnDriver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDriver")
            .field("assumed_state", &self.assumed_state)
            .finish_non_exhaustive()
    }
}

impl<F> SwitchDriver for FnDriver<F>
where
    F: Fn(bool, &StatePublisher),
{
    fn write_state(&self, state: bool, publisher: &StatePublisher) {
        (self.write)(state, publisher);
    }

    fn assumed_state(&self) -> bool {
        self.assumed_state
    }
}

/// Creates a driver from a closure receiving the physical target state.
///
/// ```
/// use switch_entity::{Switch, switch::from_fn};
///
/// let switch = Switch::builder("Valve")
///     .build(from_fn(|state, publisher| publisher.publish_state(state)))
///     .unwrap();
/// switch.toggle();
/// assert!(switch.state());
/// ```
pub fn from_fn<F>(write: F) -> FnDriver<F>
where
    F: Fn(bool, &StatePublisher),
{
    FnDriver {
        write,
        assumed_state: false,
    }
}

/// Handle through which a driver reports the physical state it achieved.
///
/// Cheap to clone, `Send + Sync`, and valid for as long as any clone exists,
/// even after the [`Switch`](super::Switch) itself is dropped.
#[derive(Clone)]
pub struct StatePublisher {
    shared: Arc<Shared>,
}

impl StatePublisher {
    pub(super) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Reports the physical state the hardware reached.
    ///
    /// Runs the publish pipeline: duplicate reports are dropped, otherwise
    /// the logical state is updated, persisted when the restore mode asks
    /// for it, and announced to observers.
    pub fn publish_state(&self, state: bool) {
        self.shared.publish_state(state);
    }

    /// Returns the name of the switch this handle reports to.
    #[must_use]
    pub fn name(&self) -> &str {
        self.shared.info.name()
    }
}

impl fmt::Debug for StatePublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatePublisher")
            .field("switch", &self.shared.info.name())
            .finish()
    }
}
