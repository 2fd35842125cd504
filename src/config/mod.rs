//! Configuration file support for inkpad.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/inkpad/config.toml`. Settings
//! include surface appearance, brush defaults, export destination, and the
//! optional remote collection endpoint.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{BrushConfig, ExportConfig, RemoteConfig, SurfaceConfig};

use crate::draw::Color;
use crate::util::parse_color_spec;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [surface]
/// background_color = "#ffffff"
/// scale = 1.0
///
/// [brush]
/// default_color = "black"
/// default_width = 5.0
/// min_width = 1.0
/// max_width = 50.0
///
/// [export]
/// filename_prefix = "sketch"
///
/// [remote]
/// endpoint = "https://collect.example.com/sketches"
/// require_identifier = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Surface appearance (background color, pixel density scaling)
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Brush defaults (color, width, width bounds)
    #[serde(default)]
    pub brush: BrushConfig,

    /// Local export settings (directory, filename prefix)
    #[serde(default)]
    pub export: ExportConfig,

    /// Remote submission settings (endpoint, identifier requirement)
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped or replaced with their defaults and a
    /// warning is logged, so a hand-edited config file can never produce a
    /// zero-width brush or an unparseable color at draw time.
    ///
    /// Validated ranges:
    /// - `surface.scale`: 0.5 - 4.0
    /// - `brush.min_width` / `brush.max_width`: 0.5 - 200.0, min <= max
    /// - `brush.default_width`: clamped into `[min_width, max_width]`
    /// - `remote.timeout_secs`: 1 - 120
    fn validate_and_clamp(&mut self) {
        // Scale: 0.5 - 4.0
        if !(0.5..=4.0).contains(&self.surface.scale) {
            log::warn!(
                "Invalid surface scale {:.2}, clamping to 0.5-4.0 range",
                self.surface.scale
            );
            self.surface.scale = self.surface.scale.clamp(0.5, 4.0);
        }

        // Width bounds: positive, ordered
        if !(0.5..=200.0).contains(&self.brush.min_width)
            || !(0.5..=200.0).contains(&self.brush.max_width)
            || self.brush.min_width > self.brush.max_width
        {
            log::warn!(
                "Invalid brush width bounds {:.1}-{:.1}, falling back to 1.0-50.0",
                self.brush.min_width,
                self.brush.max_width
            );
            self.brush.min_width = 1.0;
            self.brush.max_width = 50.0;
        }

        // Default width inside the bounds
        if !(self.brush.min_width..=self.brush.max_width).contains(&self.brush.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to {:.1}-{:.1} range",
                self.brush.default_width,
                self.brush.min_width,
                self.brush.max_width
            );
            self.brush.default_width = self
                .brush
                .default_width
                .clamp(self.brush.min_width, self.brush.max_width);
        }

        // Colors must parse
        if parse_color_spec(&self.surface.background_color).is_none() {
            log::warn!(
                "Invalid background_color '{}', falling back to '#ffffff'",
                self.surface.background_color
            );
            self.surface.background_color = "#ffffff".to_string();
        }
        if parse_color_spec(&self.brush.default_color).is_none() {
            log::warn!(
                "Invalid default_color '{}', falling back to '#000000'",
                self.brush.default_color
            );
            self.brush.default_color = "#000000".to_string();
        }

        // Filename prefix must not be empty
        if self.export.filename_prefix.trim().is_empty() {
            log::warn!("Empty filename_prefix, falling back to 'sketch'");
            self.export.filename_prefix = "sketch".to_string();
        }

        // Endpoint must be a valid URL if present
        if let Some(endpoint) = &self.remote.endpoint {
            if url::Url::parse(endpoint).is_err() {
                log::warn!("Invalid remote endpoint '{endpoint}', disabling submission");
                self.remote.endpoint = None;
            }
        }

        // Timeout: 1 - 120 seconds
        if !(1..=120).contains(&self.remote.timeout_secs) {
            log::warn!(
                "Invalid remote timeout {}s, clamping to 1-120s range",
                self.remote.timeout_secs
            );
            self.remote.timeout_secs = self.remote.timeout_secs.clamp(1, 120);
        }
    }

    /// The background color as a parsed [`Color`].
    ///
    /// Call after [`Config::load`]; validation guarantees the value parses.
    pub fn background_color(&self) -> Color {
        parse_color_spec(&self.surface.background_color).unwrap_or(crate::draw::color::WHITE)
    }

    /// The default brush color as a parsed [`Color`].
    pub fn brush_color(&self) -> Color {
        parse_color_spec(&self.brush.default_color).unwrap_or(crate::draw::color::BLACK)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g. HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
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

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Creates the parent directory if it doesn't exist. Used by the
    /// `--write-config` flag to materialize the effective configuration.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let mut config = Config::default();
        config.validate_and_clamp();
        assert_eq!(config.surface.background_color, "#ffffff");
        assert_eq!(config.brush.default_width, 5.0);
        assert!(config.remote.endpoint.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.surface.scale = 10.0;
        config.brush.default_width = 500.0;
        config.remote.timeout_secs = 0;

        config.validate_and_clamp();
        assert_eq!(config.surface.scale, 4.0);
        assert_eq!(config.brush.default_width, config.brush.max_width);
        assert_eq!(config.remote.timeout_secs, 1);
    }

    #[test]
    fn inverted_width_bounds_fall_back_to_defaults() {
        let mut config = Config::default();
        config.brush.min_width = 30.0;
        config.brush.max_width = 2.0;

        config.validate_and_clamp();
        assert_eq!(config.brush.min_width, 1.0);
        assert_eq!(config.brush.max_width, 50.0);
    }

    #[test]
    fn unparseable_colors_fall_back() {
        let mut config = Config::default();
        config.surface.background_color = "not-a-color".to_string();
        config.brush.default_color = "#12345".to_string();

        config.validate_and_clamp();
        assert_eq!(config.surface.background_color, "#ffffff");
        assert_eq!(config.brush.default_color, "#000000");
    }

    #[test]
    fn invalid_endpoint_disables_submission() {
        let mut config = Config::default();
        config.remote.endpoint = Some("not a url".to_string());

        config.validate_and_clamp();
        assert!(config.remote.endpoint.is_none());
    }

    #[test]
    fn color_names_are_accepted() {
        let mut config = Config::default();
        config.brush.default_color = "red".to_string();

        config.validate_and_clamp();
        assert_eq!(config.brush_color(), crate::draw::color::RED);
    }
}
