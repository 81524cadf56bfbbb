use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::primitives::token::ColorClass;
use crate::view::palette::Rgb;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Scrollbar mapping and scrolling behavior
    #[serde(default)]
    pub scroll: ScrollConfig,

    /// Line-number gutter
    #[serde(default)]
    pub gutter: GutterConfig,

    /// Font metrics used when the glyph provider cannot measure
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Color overrides keyed by color class name (e.g. "keyword": "#0057ae")
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

/// Scrolling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScrollConfig {
    /// Smallest visible/total ratio still mapped one scrollbar unit per line
    /// (default: 0.05). Below it the scrollbar switches to compressed units.
    #[serde(default = "default_min_fraction")]
    pub min_fraction: f64,

    /// Scrollbar maximum in compressed mode (default: 2000)
    #[serde(default = "default_max_units")]
    pub max_units: u32,

    /// Lines scrolled per wheel notch (default: 3)
    #[serde(default = "default_wheel_lines")]
    pub wheel_lines: u32,

    /// Lines scrolled per wheel notch while Ctrl is held (default: 10)
    #[serde(default = "default_wheel_lines_accelerated")]
    pub wheel_lines_accelerated: u32,

    /// Right-hand margin kept when revealing a position horizontally (default: 40)
    #[serde(default = "default_horizontal_margin_px")]
    pub horizontal_margin_px: u32,

    /// Pixels per horizontal scrollbar step (default: 10)
    #[serde(default = "default_horizontal_increment_px")]
    pub horizontal_increment_px: u32,
}

fn default_min_fraction() -> f64 {
    0.05
}

fn default_max_units() -> u32 {
    2000
}

fn default_wheel_lines() -> u32 {
    3
}

fn default_wheel_lines_accelerated() -> u32 {
    10
}

fn default_horizontal_margin_px() -> u32 {
    40
}

fn default_horizontal_increment_px() -> u32 {
    10
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            min_fraction: default_min_fraction(),
            max_units: default_max_units(),
            wheel_lines: default_wheel_lines(),
            wheel_lines_accelerated: default_wheel_lines_accelerated(),
            horizontal_margin_px: default_horizontal_margin_px(),
            horizontal_increment_px: default_horizontal_increment_px(),
        }
    }
}

/// Gutter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GutterConfig {
    /// Show line numbers (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum number of digit cells reserved (default: 2)
    #[serde(default = "default_min_digits")]
    pub min_digits: u32,

    /// Padding cells around the number (default: 2)
    #[serde(default = "default_padding_cells")]
    pub padding_cells: u32,
}

fn default_true() -> bool {
    true
}

fn default_min_digits() -> u32 {
    2
}

fn default_padding_cells() -> u32 {
    2
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_digits: default_min_digits(),
            padding_cells: default_padding_cells(),
        }
    }
}

/// Fallback font metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetricsConfig {
    /// Cell width in pixels when the reference glyph cannot be measured (default: 8)
    #[serde(default = "default_cell_width")]
    pub fallback_cell_width: u32,

    /// Line height in pixels when ascent + descent is unknown (default: 16)
    #[serde(default = "default_line_height")]
    pub fallback_line_height: u32,
}

fn default_cell_width() -> u32 {
    8
}

fn default_line_height() -> u32 {
    16
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            fallback_cell_width: default_cell_width(),
            fallback_line_height: default_line_height(),
        }
    }
}

impl Config {
    /// Default config file location: `<config dir>/srcview/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("srcview").join("config.json"))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction = self.scroll.min_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "scroll.min_fraction must be in (0, 1], got {fraction}"
            )));
        }

        if self.scroll.max_units < 2 {
            return Err(ConfigError::ValidationError(
                "scroll.max_units must be at least 2".to_string(),
            ));
        }

        if self.metrics.fallback_cell_width == 0 || self.metrics.fallback_line_height == 0 {
            return Err(ConfigError::ValidationError(
                "fallback metrics must be greater than 0".to_string(),
            ));
        }

        for (name, value) in &self.colors {
            if ColorClass::from_name(name).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "unknown color class '{name}'"
                )));
            }
            if Rgb::parse_hex(value).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "color for '{name}' must be #rrggbb, got '{value}'"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
