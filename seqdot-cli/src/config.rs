//! Configuration handling for the seqdot CLI
//!
//! Supports loading configuration from seqdot.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use seqdot_render::ExportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Window used when only the threshold is given on the command line
    #[serde(default = "default_window")]
    pub window: usize,

    /// Threshold used when only the window is given on the command line
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pixels per matrix cell
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// Longest allowed side of the plot area in pixels
    #[serde(default = "default_max_image_side")]
    pub max_image_side: u32,

    #[serde(default = "default_foreground_color")]
    pub foreground_color: String,

    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Symbol ticks are drawn while both sequences are shorter than this
    #[serde(default = "default_tick_label_limit")]
    pub tick_label_limit: usize,

    /// Plot mismatches instead of matches
    #[serde(default)]
    pub invert: bool,

    /// Output path of the unfiltered plot. Only `.svg` output carries the
    /// title, parameters and axis labels; `.png` is the bare matrix.
    #[serde(default = "default_raw_output")]
    pub raw_output: PathBuf,

    /// Output path of the filtered plot
    #[serde(default = "default_filtered_output")]
    pub filtered_output: PathBuf,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

// Default value functions
fn default_window() -> usize { 4 }
fn default_threshold() -> usize { 3 }
fn default_cell_size() -> u32 { 24 }
fn default_max_image_side() -> u32 { 2048 }
fn default_foreground_color() -> String { "#000000".to_string() }
fn default_background_color() -> String { "#ffffff".to_string() }
fn default_tick_label_limit() -> usize { 12 }
fn default_raw_output() -> PathBuf { PathBuf::from("dotplot.svg") }
fn default_filtered_output() -> PathBuf { PathBuf::from("dotplot2.svg") }
fn default_font_family() -> String { "Arial, sans-serif".to_string() }
fn default_font_size() -> u32 { 12 }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            threshold: default_threshold(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            max_image_side: default_max_image_side(),
            foreground_color: default_foreground_color(),
            background_color: default_background_color(),
            tick_label_limit: default_tick_label_limit(),
            invert: false,
            raw_output: default_raw_output(),
            filtered_output: default_filtered_output(),
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}

impl RenderConfig {
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            cell_size: self.cell_size,
            max_image_side: self.max_image_side,
            foreground_color: self.foreground_color.clone(),
            background_color: self.background_color.clone(),
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            tick_label_limit: self.tick_label_limit,
            invert: self.invert,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("seqdot.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: seqdot.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> CliResult<()> {
        if self.render.cell_size == 0 {
            return Err(CliError::config("render.cell_size must be at least 1"));
        }
        if self.render.max_image_side == 0 {
            return Err(CliError::config("render.max_image_side must be at least 1"));
        }
        if self.filter.window == 0 || self.filter.threshold == 0 {
            return Err(CliError::config(
                "filter.window and filter.threshold must be at least 1",
            ));
        }
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).expect("Failed to serialize default configuration")
    }
}
