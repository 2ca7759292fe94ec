//! Configuration file support for doodler.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/doodler/config.toml`. Settings include brush defaults, surface
//! size and background, history depth, and input decimation.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingConfig, HistoryConfig, InputConfig, SurfaceConfig};

use crate::draw::surface::MAX_SURFACE_DIMENSION;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_width = 10.0
/// default_alpha = 255
///
/// [surface]
/// width = 1024
/// height = 768
/// background = "white"
///
/// [history]
/// max_depth = 100
///
/// [input]
/// min_point_distance = 1.5
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush defaults (color, width, opacity)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Render surface size and background
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Undo/redo limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// Pointer input tuning
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 200.0
    /// - `default_alpha`: 0 - 255
    /// - `surface.width`, `surface.height`: 1 - 16384
    /// - `min_point_distance`: 0.0 - 50.0
    pub fn validate_and_clamp(&mut self) {
        // Width: 1.0 - 200.0
        if !(1.0..=200.0).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 1.0-200.0 range",
                self.drawing.default_width
            );
            self.drawing.default_width = if self.drawing.default_width.is_nan() {
                1.0
            } else {
                self.drawing.default_width.clamp(1.0, 200.0)
            };
        }

        // Alpha: 0 - 255
        if !(0..=255).contains(&self.drawing.default_alpha) {
            log::warn!(
                "Invalid default_alpha {}, clamping to 0-255 range",
                self.drawing.default_alpha
            );
            self.drawing.default_alpha = self.drawing.default_alpha.clamp(0, 255);
        }

        if !self.drawing.default_color.is_valid() {
            log::warn!(
                "Invalid default_color {:?}, falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::Name("black".to_string());
        }

        // Surface dimensions: 1 - 16384
        for (name, value) in [
            ("width", &mut self.surface.width),
            ("height", &mut self.surface.height),
        ] {
            if !(1..=MAX_SURFACE_DIMENSION).contains(&*value) {
                log::warn!(
                    "Invalid surface {} {}, clamping to 1-{} range",
                    name,
                    value,
                    MAX_SURFACE_DIMENSION
                );
                *value = (*value).clamp(1, MAX_SURFACE_DIMENSION);
            }
        }

        if self
            .surface
            .background
            .as_ref()
            .is_some_and(|spec| !spec.is_valid())
        {
            log::warn!(
                "Invalid surface background {:?}, using transparent",
                self.surface.background
            );
            self.surface.background = None;
        }

        // Point distance: 0.0 - 50.0
        if !(0.0..=50.0).contains(&self.input.min_point_distance) {
            log::warn!(
                "Invalid min_point_distance {:.1}, clamping to 0.0-50.0 range",
                self.input.min_point_distance
            );
            self.input.min_point_distance = if self.input.min_point_distance.is_nan() {
                0.0
            } else {
                self.input.min_point_distance.clamp(0.0, 50.0)
            };
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/doodler/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("doodler");

        Ok(config_dir.join("config.toml"))
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

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses configuration text and clamps it to valid ranges.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
