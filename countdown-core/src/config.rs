//! Configuration for where events are persisted.
//!
//! Read from `~/.config/event-countdown/config.toml`. Every key is optional:
//!
//! ```toml
//! data_dir = "~/.local/share/event-countdown"
//! store_key = "SavedEvents"
//! persist_policy = "silent"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::byte_store::FileByteStore;
use crate::error::{CountdownError, CountdownResult};
use crate::store::{EventStore, DEFAULT_STORE_KEY};

static DEFAULT_DATA_DIR: &str = "~/.local/share/event-countdown";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

/// What happens when writing the event list fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistPolicy {
    /// Log the failure and carry on with the in-memory list
    #[default]
    Silent,
    /// Also keep the failure for `EventStore::last_persist_error`
    Report,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_store_key")]
    pub store_key: String,

    #[serde(default)]
    pub persist_policy: PersistPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: default_data_dir(),
            store_key: default_store_key(),
            persist_policy: PersistPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn config_path() -> CountdownResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CountdownError::Config("Could not determine config directory".into()))?
            .join("event-countdown");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented default file on first run.
    pub fn load() -> CountdownResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> CountdownResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CountdownError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CountdownError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> CountdownResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CountdownError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| CountdownError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// An event store backed by files in the configured data directory.
    pub fn open_store(&self) -> EventStore<FileByteStore> {
        EventStore::from_config(FileByteStore::new(self.data_path()), self)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CountdownResult<()> {
        let contents = format!(
            "\
# event-countdown configuration

# Where saved events live:
# data_dir = \"{}\"

# Name of the saved event list inside data_dir:
# store_key = \"{}\"

# \"silent\" ignores failed saves, \"report\" keeps the last failure:
# persist_policy = \"silent\"
",
            DEFAULT_DATA_DIR, DEFAULT_STORE_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CountdownError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CountdownError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event-countdown/config.toml");

        StoreConfig::create_default_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(StoreConfig::load_from(&path).unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/countdown\"\nstore_key = \"Events\"\npersist_policy = \"report\"\n",
        )
        .unwrap();

        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/countdown"));
        assert_eq!(config.store_key, "Events");
        assert_eq!(config.persist_policy, PersistPolicy::Report);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = StoreConfig {
            data_dir: dir.path().join("data"),
            store_key: "Mine".into(),
            persist_policy: PersistPolicy::Report,
        };

        config.save_to(&path).unwrap();
        assert_eq!(StoreConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_policy_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "persist_policy = \"sometimes\"\n").unwrap();

        assert!(matches!(
            StoreConfig::load_from(&path),
            Err(CountdownError::Config(_))
        ));
    }

    #[test]
    fn test_data_path_expands_tilde() {
        let config = StoreConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_open_store_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: dir.path().to_path_buf(),
            ..StoreConfig::default()
        };

        let store = config.open_store();
        assert_eq!(store.key(), DEFAULT_STORE_KEY);
        assert_eq!(store.byte_store().dir(), dir.path());
    }
}
