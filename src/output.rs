// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch driver backed by a binary output.
//!
//! Most relays and GPIO-driven loads cannot be read back: once the output
//! is written, the written value *is* the state. [`OutputSwitch`] models
//! that by writing the output and reporting the same value straight away.

use std::sync::Arc;

use crate::switch::{StatePublisher, SwitchDriver};

/// A two-state output (relay coil, GPIO pin, solid-state switch, ...).
pub trait BinaryOutput: Send + Sync {
    /// Drives the output high (`true`) or low (`false`).
    fn set_state(&self, state: bool);
}

impl<T: BinaryOutput + ?Sized> BinaryOutput for Arc<T> {
    fn set_state(&self, state: bool) {
        (**self).set_state(state);
    }
}

/// [`SwitchDriver`] that forwards commands to a [`BinaryOutput`] and reports
/// the written state as achieved.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use switch_entity::Switch;
/// use switch_entity::output::{BinaryOutput, OutputSwitch};
///
/// #[derive(Default)]
/// struct Pin(AtomicBool);
///
/// impl BinaryOutput for Pin {
///     fn set_state(&self, state: bool) {
///         self.0.store(state, Ordering::SeqCst);
///     }
/// }
///
/// let pin = Arc::new(Pin::default());
/// let switch = Switch::builder("Relay 1")
///     .with_inverted(true)
///     .build(OutputSwitch::new(Arc::clone(&pin)))
///     .unwrap();
///
/// switch.turn_on();
/// assert!(switch.state());
/// assert!(!pin.0.load(Ordering::SeqCst));
/// ```
#[derive(Debug)]
pub struct OutputSwitch<O> {
    output: O,
}

impl<O: BinaryOutput> OutputSwitch<O> {
    /// Wraps `output`.
    #[must_use]
    pub fn new(output: O) -> Self {
        Self { output }
    }

    /// Returns the wrapped output.
    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: BinaryOutput> SwitchDriver for OutputSwitch<O> {
    fn write_state(&self, state: bool, publisher: &StatePublisher) {
        self.output.set_state(state);
        publisher.publish_state(state);
    }
}
