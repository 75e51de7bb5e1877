// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the switch entity library.
//!
//! Command and publish operations on a switch never fail. Errors only surface
//! at the edges: parsing values and configuration documents, and the
//! preference store backends whose failures the switch itself tolerates.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while reading or writing persisted state.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Error occurred while loading a switch configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An unknown restore mode name was provided.
    #[error("invalid restore mode: {0}")]
    InvalidRestoreMode(String),

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// The entity name is empty, so no identity key can be derived.
    #[error("entity name must not be empty")]
    EmptyName,
}

/// Errors reported by a [`PreferenceStore`](crate::persistence::PreferenceStore).
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors related to switch configuration documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value outside its allowed set.
    #[error("invalid config value: {0}")]
    Value(#[from] ValueError),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
