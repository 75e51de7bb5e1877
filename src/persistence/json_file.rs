// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Preference store persisted as a JSON document.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{PreferenceKey, PreferenceStore};
use crate::error::PersistenceError;

/// [`PreferenceStore`] that keeps every key in one JSON object on disk.
///
/// Keys are written as eight-digit hex strings. A missing file reads as an
/// empty store; the file and its parent directories are created on the
/// first save.
///
/// Saves write a sibling `.tmp` file and rename it over the document, so an
/// interrupted save leaves the previous document intact. A document that
/// fails to parse is reported by [`load`](PreferenceStore::load) and
/// replaced by the next [`save`](PreferenceStore::save).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, bool>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, document: &BTreeMap<String, bool>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(document)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self, key: PreferenceKey) -> Result<Option<bool>, PersistenceError> {
        let _guard = self.lock.lock();
        let document = self.read_document()?;
        Ok(document.get(&key.to_string()).copied())
    }

    fn save(&self, key: PreferenceKey, value: bool) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock();
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(PersistenceError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable preference document"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        document.insert(key.to_string(), value);
        self.write_document(&document)?;
        tracing::trace!(path = %self.path.display(), key = %key, value, "Saved preference");
        Ok(())
    }
}
