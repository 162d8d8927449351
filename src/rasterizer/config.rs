//! Renderer configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.
//! Every field has a default, so a file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::types::{Color, RasterSettings};
use super::{HEIGHT, WIDTH};

/// Frame size, clear color and fragment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub settings: RasterSettings,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: WIDTH as u32,
            height: HEIGHT as u32,
            clear_color: Color::CORNFLOWER,
            settings: RasterSettings::default(),
        }
    }
}

impl RendererConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RendererConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RendererConfig, ConfigError> {
    let config: RendererConfig = ron::from_str(s)?;
    config.validate()
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RendererConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
