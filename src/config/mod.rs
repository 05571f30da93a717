//! Configuration file support for glissemontre.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/glissemontre/config.toml`. Settings cover editor behaviour,
//! preview styling and slideshow storage.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, CompressionSetting, SelectionMode};
pub use types::{EditorConfig, StorageConfig, StyleConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [editor]
/// selection_mode = "multi"
/// default_point_radius = 12.0
///
/// [style]
/// stroke_color = "blue"
/// selected_color = [255, 128, 0]
///
/// [storage]
/// directory = "~/slideshows"
/// compress = "auto"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Selection and editing behaviour
    #[serde(default)]
    pub editor: EditorConfig,

    /// Shape colours used by previews
    #[serde(default)]
    pub style: StyleConfig,

    /// Slideshow persistence
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `editor.default_point_radius`: 1.0 - 500.0
    /// - `editor.undo_depth`: 0 - 1000
    /// - `style.fill_opacity`: 0.0 - 1.0
    /// - `style.stroke_width`: 0.5 - 20.0
    /// - `storage.auto_compress_threshold_kb`, `storage.max_file_size_mb`: at least 1
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=500.0).contains(&self.editor.default_point_radius) {
            warn!(
                "Invalid default_point_radius {:.1}, clamping to 1.0-500.0 range",
                self.editor.default_point_radius
            );
            self.editor.default_point_radius = if self.editor.default_point_radius.is_nan() {
                1.0
            } else {
                self.editor.default_point_radius.clamp(1.0, 500.0)
            };
        }

        if self.editor.undo_depth > 1000 {
            warn!(
                "Invalid undo_depth {}, clamping to 0-1000 range",
                self.editor.undo_depth
            );
            self.editor.undo_depth = 1000;
        }

        if !(0.0..=1.0).contains(&self.style.fill_opacity) {
            warn!(
                "Invalid fill_opacity {:.2}, clamping to 0.0-1.0 range",
                self.style.fill_opacity
            );
            self.style.fill_opacity = if self.style.fill_opacity.is_nan() {
                0.0
            } else {
                self.style.fill_opacity.clamp(0.0, 1.0)
            };
        }

        if !(0.5..=20.0).contains(&self.style.stroke_width) {
            warn!(
                "Invalid stroke_width {:.1}, clamping to 0.5-20.0 range",
                self.style.stroke_width
            );
            self.style.stroke_width = if self.style.stroke_width.is_nan() {
                0.5
            } else {
                self.style.stroke_width.clamp(0.5, 20.0)
            };
        }

        if self.storage.auto_compress_threshold_kb == 0 {
            warn!("auto_compress_threshold_kb must be at least 1, using 1");
            self.storage.auto_compress_threshold_kb = 1;
        }

        if self.storage.max_file_size_mb == 0 {
            warn!("max_file_size_mb must be at least 1, using 1");
            self.storage.max_file_size_mb = 1;
        }

        if let Some(dir) = &self.storage.directory {
            if dir.trim().is_empty() {
                warn!("storage.directory is empty, falling back to the default location");
                self.storage.directory = None;
            }
        }
    }

    /// Directory holding `config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("glissemontre"))
    }

    /// Returns the path to the configuration file.
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it is missing.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the configuration to TOML at `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
