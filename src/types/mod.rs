// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the crate.
//!
//! - [`PowerState`] - On/Off rendering of a switch state
//! - [`RestoreMode`] - Boot-time restore policy

mod power;
mod restore_mode;

pub use power::PowerState;
pub use restore_mode::RestoreMode;
