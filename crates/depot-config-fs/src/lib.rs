// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Keeps Depot preferences as one JSON file per key.
//!
//! The default location is the per-user config directory
//! (`~/.config/depot` on Linux); `--config-dir` style overrides use
//! [`FsConfigStore::at`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use depot_app_core::config::{ConfigError, ConfigStore};
use directories::ProjectDirs;

/// [`ConfigStore`] writing `<base>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Opens the per-user Depot config directory, creating it if needed.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs =
            ProjectDirs::from("dev", "flyingrobots", "Depot").ok_or(ConfigError::NoUserConfigDir)?;
        Self::at(dirs.config_dir())
    }

    /// Opens `base` as the config directory, creating it if needed.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        if let Err(err) = fs::create_dir_all(&base) {
            return Err(ConfigError::Unavailable {
                path: base,
                source: err,
            });
        }
        Ok(Self { base })
    }

    /// Directory holding the JSON files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

fn io_error(key: &str, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        key: key.to_owned(),
        source,
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.file_for(key)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(key.to_owned()),
            _ => io_error(key, err),
        })
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let file = self.file_for(key);
        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir).map_err(|err| io_error(key, err))?;
        }
        fs::write(&file, data).map_err(|err| io_error(key, err))
    }
}
