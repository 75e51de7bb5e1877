// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identity: display name, object id and persistence key.

use std::fmt;

use crate::error::ValueError;
use crate::persistence::PreferenceKey;

const FNV1_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV1_PRIME: u32 = 16_777_619;

/// Identity of an entity, derived once from its name.
///
/// The object id is the name in snake case with every character outside
/// `[a-z0-9_-]` replaced by `_`. The persistence key is the 32-bit FNV-1 hash
/// of the object id, so renaming an entity moves its persisted state.
///
/// # Examples
///
/// ```
/// use switch_entity::entity::EntityInfo;
///
/// let info = EntityInfo::new("Living Room Lamp").unwrap();
/// assert_eq!(info.name(), "Living Room Lamp");
/// assert_eq!(info.object_id(), "living_room_lamp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    name: String,
    object_id: String,
    key: PreferenceKey,
}

impl EntityInfo {
    /// Derives the identity for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyName`] if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ValueError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValueError::EmptyName);
        }
        let object_id = object_id(&name);
        let key = PreferenceKey::new(fnv1_hash(&object_id));
        Ok(Self {
            name,
            object_id,
            key,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sanitized snake-case object id.
    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Returns the key addressing this entity's persisted state.
    #[must_use]
    pub fn key(&self) -> PreferenceKey {
        self.key
    }
}

impl fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn object_id(name: &str) -> String {
    name.bytes()
        .map(|b| match b.to_ascii_lowercase() {
            c @ (b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-') => char::from(c),
            _ => '_',
        })
        .collect()
}

/// 32-bit FNV-1 hash (multiply, then xor).
fn fnv1_hash(value: &str) -> u32 {
    value.bytes().fold(FNV1_OFFSET_BASIS, |hash, byte| {
        hash.wrapping_mul(FNV1_PRIME) ^ u32::from(byte)
    })
}
