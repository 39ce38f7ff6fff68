// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved-preference storage for Depot front ends.
//!
//! [`ConfigService`] handles JSON encoding; a [`ConfigStore`] only moves
//! raw bytes, so front ends can swap the filesystem for anything else.

use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Backing storage for raw preference blobs, addressed by key.
///
/// Implementations report a missing key as [`ConfigError::NotFound`] so the
/// service can tell "never saved" apart from a failing store.
pub trait ConfigStore {
    /// Reads the blob stored under `key`.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces the blob stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure reading or writing saved preferences.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing has been saved under this key yet.
    #[error("no config saved under `{0}`")]
    NotFound(String),
    /// The store could not read or write the blob for `key`.
    #[error("config `{key}` could not be accessed: {source}")]
    Io {
        /// Key being read or written.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The stored blob for `key` is not valid JSON for the requested type.
    #[error("config `{key}` is malformed: {source}")]
    Malformed {
        /// Key whose blob failed to decode.
        key: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The value for `key` could not be encoded as JSON.
    #[error("config `{key}` could not be encoded: {source}")]
    Encode {
        /// Key being saved.
        key: String,
        /// Encoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The platform reports no per-user config directory (no home dir).
    #[error("no per-user config directory is available; pass a config dir explicitly")]
    NoUserConfigDir,
    /// The config directory could not be created.
    #[error("config directory {} is unavailable: {source}", .path.display())]
    Unavailable {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
}

/// Typed access to saved preferences on top of a [`ConfigStore`].
///
/// Values are stored as pretty-printed JSON.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Reads the value saved under `key`.
    ///
    /// A key that was never saved, or holds an empty blob, reads as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Malformed {
                key: key.to_owned(),
                source,
            })
    }

    /// Reads `key`, falling back to `T::default()` when nothing is saved.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Saves `value` under `key`, replacing any previous value.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value).map_err(|source| ConfigError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.store.save_raw(key, &data)
    }
}
