// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boot-time restore policy for a switch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValueError;

/// How a switch picks its state when the device boots.
///
/// The four `Restore*` variants are *persistent*: they read the last saved
/// state at boot and save every accepted state change. `AlwaysOff` and
/// `AlwaysOn` never touch storage.
///
/// Names follow the firmware configuration vocabulary and parse
/// case-insensitively, with spaces accepted in place of underscores:
///
/// ```
/// use switch_entity::types::RestoreMode;
///
/// let mode: RestoreMode = "restore default on".parse().unwrap();
/// assert_eq!(mode, RestoreMode::RestoreDefaultOn);
/// assert!(mode.is_persistent());
/// assert!(!RestoreMode::AlwaysOff.is_persistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RestoreMode {
    /// Restore the saved state, or off when nothing was saved.
    #[default]
    RestoreDefaultOff,
    /// Restore the saved state, or on when nothing was saved.
    RestoreDefaultOn,
    /// Restore the negation of the saved state, or on when nothing was saved.
    RestoreInvertedDefaultOff,
    /// Restore the negation of the saved state, or off when nothing was saved.
    RestoreInvertedDefaultOn,
    /// Always start off.
    AlwaysOff,
    /// Always start on.
    AlwaysOn,
}

impl RestoreMode {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::RestoreDefaultOff,
        Self::RestoreDefaultOn,
        Self::RestoreInvertedDefaultOff,
        Self::RestoreInvertedDefaultOn,
        Self::AlwaysOff,
        Self::AlwaysOn,
    ];

    /// Returns the configuration name of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RestoreDefaultOff => "RESTORE_DEFAULT_OFF",
            Self::RestoreDefaultOn => "RESTORE_DEFAULT_ON",
            Self::RestoreInvertedDefaultOff => "RESTORE_INVERTED_DEFAULT_OFF",
            Self::RestoreInvertedDefaultOn => "RESTORE_INVERTED_DEFAULT_ON",
            Self::AlwaysOff => "ALWAYS_OFF",
            Self::AlwaysOn => "ALWAYS_ON",
        }
    }

    /// Returns `true` if this mode reads and writes the preference store.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !matches!(self, Self::AlwaysOff | Self::AlwaysOn)
    }
}

impl fmt::Display for RestoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestoreMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ValueError::InvalidRestoreMode(s.to_string()))
    }
}

impl Serialize for RestoreMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RestoreMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
