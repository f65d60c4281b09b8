//! Engine configuration with file-backed persistence.
//!
//! `Settings` is an injected value: the engine reads it, never mutates it,
//! and owns no global. The `SettingsStore` collaborator handles the
//! load-at-start / persist-on-change lifecycle against a TOML file in the
//! platform config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read the settings file (permissions, I/O).
    #[error("Failed to read settings file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Settings file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Failed to write the settings file.
    #[error("Failed to write settings file at {path}: {reason}")]
    WriteError {
        /// Path that failed to write.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },
}

/// Engine tunables.
///
/// Injected into the loader, window calculator, and feed facade as a plain
/// value; load/persist is handled by [`SettingsStore`] outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Total number of items the dataset can grow to.
    pub total_items: usize,
    /// Estimated pixel height for unmeasured items.
    pub default_item_height: usize,
    /// Viewport height in pixels.
    pub container_height: usize,
    /// Render buffer beyond the viewport, in default-height units.
    pub buffer: usize,
    /// Hard cap on rendered items per window.
    pub max_rendered_items: usize,
    /// Distance-to-bottom (pixels) below which the next batch loads.
    pub infinite_scroll_threshold: usize,
    /// Items per loaded batch.
    pub items_per_page: usize,
    /// Items generated on first start.
    pub initial_items: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_items: 1_000_000,
            default_item_height: 80,
            container_height: 600,
            buffer: 2,
            max_rendered_items: 30,
            infinite_scroll_threshold: 300,
            items_per_page: 50,
            initial_items: 10_000,
        }
    }
}

/// TOML settings file structure.
///
/// All fields are optional - anything unspecified falls back to the
/// hardcoded default, so a partial file merges over [`Settings::default`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Overrides [`Settings::total_items`].
    #[serde(default)]
    pub total_items: Option<usize>,
    /// Overrides [`Settings::default_item_height`].
    #[serde(default)]
    pub default_item_height: Option<usize>,
    /// Overrides [`Settings::container_height`].
    #[serde(default)]
    pub container_height: Option<usize>,
    /// Overrides [`Settings::buffer`].
    #[serde(default)]
    pub buffer: Option<usize>,
    /// Overrides [`Settings::max_rendered_items`].
    #[serde(default)]
    pub max_rendered_items: Option<usize>,
    /// Overrides [`Settings::infinite_scroll_threshold`].
    #[serde(default)]
    pub infinite_scroll_threshold: Option<usize>,
    /// Overrides [`Settings::items_per_page`].
    #[serde(default)]
    pub items_per_page: Option<usize>,
    /// Overrides [`Settings::initial_items`].
    #[serde(default)]
    pub initial_items: Option<usize>,
}

impl SettingsFile {
    /// Merge this partial file over the defaults.
    pub fn resolve(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            total_items: self.total_items.unwrap_or(defaults.total_items),
            default_item_height: self
                .default_item_height
                .unwrap_or(defaults.default_item_height),
            container_height: self.container_height.unwrap_or(defaults.container_height),
            buffer: self.buffer.unwrap_or(defaults.buffer),
            max_rendered_items: self
                .max_rendered_items
                .unwrap_or(defaults.max_rendered_items),
            infinite_scroll_threshold: self
                .infinite_scroll_threshold
                .unwrap_or(defaults.infinite_scroll_threshold),
            items_per_page: self.items_per_page.unwrap_or(defaults.items_per_page),
            initial_items: self.initial_items.unwrap_or(defaults.initial_items),
        }
    }
}

/// Resolve the default settings file path.
///
/// `~/.config/vfeed/settings.toml` on Unix-like systems, or the platform
/// equivalent. Falls back to the current directory when no config dir can
/// be determined.
pub fn default_settings_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("vfeed").join("settings.toml")
    } else {
        PathBuf::from("settings.toml")
    }
}

/// File-backed settings collaborator.
///
/// Owns the settings lifecycle: `load()` at startup (absent file means
/// defaults), `save()` on every change.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location.
    pub fn at_default_path() -> Self {
        Self::new(default_settings_path())
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, merging the file (if present) over defaults.
    ///
    /// A missing file is not an error - it means first run, so defaults.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(err) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    reason: err.to_string(),
                });
            }
        };

        let file: SettingsFile =
            toml::from_str(&contents).map_err(|err| ConfigError::ParseError {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;
        Ok(file.resolve())
    }

    /// Persist the full settings value.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let write_error = |reason: String| ConfigError::WriteError {
            path: self.path.clone(),
            reason,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| write_error(err.to_string()))?;
        }
        let contents =
            toml::to_string_pretty(settings).map_err(|err| write_error(err.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|err| write_error(err.to_string()))
    }
}
