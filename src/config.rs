//! Configuration management for the render speed test

use crate::error::{Error, Result};
use crate::timing::DEFAULT_REPEAT_COUNT;
use crate::token_store::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "render-speed.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub bench: BenchConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub development: DevelopmentConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FontConfig {
    /// Font file; system locations are probed when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub size: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchConfig {
    #[serde(default = "default_repeat_count")]
    pub repeat_count: usize,
    #[serde(default = "default_token_capacity")]
    pub token_capacity: usize,
    /// Paints per backend; only the first is timed
    #[serde(default = "default_paint_count")]
    pub paint_count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DevelopmentConfig {
    /// Outline every token's bounding box after drawing
    #[serde(default = "default_debug_boxes")]
    pub debug_boxes: bool,
    /// Write each backend's final surface here as `<backend>.pgm`
    #[serde(default)]
    pub dump_dir: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: default_font_size(),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repeat_count: default_repeat_count(),
            token_capacity: default_token_capacity(),
            paint_count: default_paint_count(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            debug_boxes: default_debug_boxes(),
            dump_dir: None,
        }
    }
}

fn default_font_size() -> f32 { 14.0 }
fn default_repeat_count() -> usize { DEFAULT_REPEAT_COUNT }
fn default_token_capacity() -> usize { DEFAULT_CAPACITY }
fn default_paint_count() -> usize { 2 }
fn default_width() -> u32 { 720 }
fn default_height() -> u32 { 480 }
fn default_debug_boxes() -> bool { true }

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or `render-speed.toml` if present, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !config_path.exists() {
            log::info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(AppConfig::default());
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|e| Error::io(&config_path, e))?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }
}
