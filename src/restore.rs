// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boot-time initial state resolution.

use crate::types::RestoreMode;

/// Maps a restore mode and the persisted state (if any) to the state a switch
/// starts in.
///
/// `persisted` is ignored for [`RestoreMode::AlwaysOff`] and
/// [`RestoreMode::AlwaysOn`]. For the persistent modes an absent value selects
/// the mode's default; the inverted modes negate whatever they read.
///
/// # Examples
///
/// ```
/// use switch_entity::resolve_initial_state;
/// use switch_entity::types::RestoreMode;
///
/// assert!(resolve_initial_state(RestoreMode::RestoreDefaultOn, None));
/// assert!(!resolve_initial_state(RestoreMode::RestoreInvertedDefaultOff, Some(true)));
/// assert!(resolve_initial_state(RestoreMode::AlwaysOn, Some(false)));
/// ```
#[must_use]
pub fn resolve_initial_state(mode: RestoreMode, persisted: Option<bool>) -> bool {
    match mode {
        RestoreMode::RestoreDefaultOff => persisted.unwrap_or(false),
        RestoreMode::RestoreDefaultOn => persisted.unwrap_or(true),
        RestoreMode::RestoreInvertedDefaultOff => !persisted.unwrap_or(false),
        RestoreMode::RestoreInvertedDefaultOn => !persisted.unwrap_or(true),
        RestoreMode::AlwaysOff => false,
        RestoreMode::AlwaysOn => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_policy_table() {
        // (mode, persisted=true, persisted=false, absent)
        let table = [
            (RestoreMode::RestoreDefaultOff, true, false, false),
            (RestoreMode::RestoreDefaultOn, true, false, true),
            (RestoreMode::RestoreInvertedDefaultOff, false, true, true),
            (RestoreMode::RestoreInvertedDefaultOn, false, true, false),
            (RestoreMode::AlwaysOff, false, false, false),
            (RestoreMode::AlwaysOn, true, true, true),
        ];

        for (mode, on, off, absent) in table {
            assert_eq!(resolve_initial_state(mode, Some(true)), on, "{mode} / true");
            assert_eq!(resolve_initial_state(mode, Some(false)), off, "{mode} / false");
            assert_eq!(resolve_initial_state(mode, None), absent, "{mode} / absent");
        }
    }

    #[test]
    fn always_modes_ignore_persisted_value() {
        assert!(!resolve_initial_state(RestoreMode::AlwaysOff, Some(true)));
        assert!(resolve_initial_state(RestoreMode::AlwaysOn, Some(false)));
    }
}
