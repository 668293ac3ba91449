//! Settings for a marktags run: defaults, an optional TOML settings file,
//! and field-wise CLI overrides applied by the binary. A `Settings` value
//! is built once per run and passed down explicitly; there is no global
//! configuration state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// One batch run's worth of options. `mode` and `order` stay as strings
/// here; the CLI parses them into engine types before touching any file so
/// an invalid word fails the whole run up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vault root to process.
    pub path: PathBuf,
    /// Tags to add or remove.
    pub tags: Vec<String>,
    /// "add" or "remove".
    pub mode: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Print diffs instead of writing.
    pub dry_run: bool,
    /// Copy originals under `backup_dir` before overwriting.
    pub backup: bool,
    /// "preserve" or "alpha".
    pub order: String,
    /// Filename glob for documents to process.
    pub include_glob: String,
    /// Root for mirrored backup copies.
    pub backup_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            tags: Vec::new(),
            mode: "add".to_string(),
            recursive: true,
            dry_run: false,
            backup: false,
            order: "preserve".to_string(),
            include_glob: "*.md".to_string(),
            backup_dir: PathBuf::from(".marktags-backup"),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, or `None` when the file is absent.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        settings.path = Self::expand_path(&settings.path).unwrap_or(settings.path);
        settings.backup_dir = Self::expand_path(&settings.backup_dir).unwrap_or(settings.backup_dir);

        Ok(Some(settings))
    }

    /// Load from the default location (`~/.config/marktags/config.toml`).
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/marktags");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
