// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for switch state changes.
//!
//! Observers are plain closures receiving the new logical state. They are
//! called synchronously, in registration order, every time a switch accepts
//! a state report.
//!
//! ```
//! use switch_entity::subscription::CallbackRegistry;
//!
//! let registry = CallbackRegistry::new();
//! let id = registry.add(|state| println!("switch is now {state}"));
//!
//! registry.dispatch(true);
//! assert!(registry.remove(id));
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
