//! Configuration module for peek-preview
//!
//! Holds the size of the fallback preview as percentages of the available
//! area. Settings are stored in the user's config directory and read once per
//! previewer; a missing or broken file falls back to defaults.

use crate::preview::PreviewSize;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_WIDTH_PERCENT: u8 = 40;
const DEFAULT_HEIGHT_PERCENT: u8 = 50;

const fn default_width_percent() -> u8 {
    DEFAULT_WIDTH_PERCENT
}

const fn default_height_percent() -> u8 {
    DEFAULT_HEIGHT_PERCENT
}

/// Preview settings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PeekConfig {
    /// Width of the fallback preview (0-100)
    #[serde(default = "default_width_percent")]
    pub unsupported_file_width_percent: u8,

    /// Height of the fallback preview (0-100)
    #[serde(default = "default_height_percent")]
    pub unsupported_file_height_percent: u8,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            unsupported_file_width_percent: DEFAULT_WIDTH_PERCENT,
            unsupported_file_height_percent: DEFAULT_HEIGHT_PERCENT,
        }
    }
}

impl PeekConfig {
    /// Get the path to the settings file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("peek").join("settings.toml"))
    }

    /// Load settings from `path`
    ///
    /// Percentages above 100 are clamped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        Ok(loaded.clamped())
    }

    /// Load settings from the default location, falling back to defaults
    #[must_use]
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::from_file_or_default(&path),
            Err(e) => {
                tracing::warn!(error = %e, "using default preview settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`, falling back to defaults
    #[must_use]
    pub fn from_file_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "unreadable preview settings, using defaults");
            Self::default()
        })
    }

    /// Save settings to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the settings
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Save settings to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path cannot be determined or writing fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Preview size as fractions of the available area
    #[must_use]
    pub fn preview_size(&self) -> PreviewSize {
        PreviewSize {
            width: f64::from(self.unsupported_file_width_percent) / 100.0,
            height: f64::from(self.unsupported_file_height_percent) / 100.0,
        }
    }

    fn clamped(self) -> Self {
        if self.unsupported_file_width_percent > 100 || self.unsupported_file_height_percent > 100 {
            tracing::warn!(
                width = self.unsupported_file_width_percent,
                height = self.unsupported_file_height_percent,
                "preview percentages above 100 clamped"
            );
        }
        Self {
            unsupported_file_width_percent: self.unsupported_file_width_percent.min(100),
            unsupported_file_height_percent: self.unsupported_file_height_percent.min(100),
        }
    }
}
