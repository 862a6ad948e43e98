//! Recommender configuration.
//!
//! YAML file with defaults for every field. The combination round count is
//! deliberately absent; see [`crate::enumerate::COMBINATION_ROUNDS`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encoding::IntentMap;
use crate::error::{Error, Result};
use crate::overplot::FigureSize;

/// Overplotting diagnostic settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverplotConfig {
    /// Marker size in points (1/72 inch).
    #[serde(default = "default_marker_size")]
    pub marker_size: f32,

    /// Figure width and height in inches.
    #[serde(default = "default_figure_size")]
    pub figure_size: [f32; 2],
}

fn default_marker_size() -> f32 {
    7.0
}
fn default_figure_size() -> [f32; 2] {
    [10.0, 10.0]
}

impl Default for OverplotConfig {
    fn default() -> Self {
        Self {
            marker_size: default_marker_size(),
            figure_size: default_figure_size(),
        }
    }
}

impl OverplotConfig {
    /// Figure size as a [`FigureSize`].
    #[must_use]
    pub fn figure(&self) -> FigureSize {
        FigureSize::new(self.figure_size[0], self.figure_size[1])
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Score and sort designs.
    #[serde(default = "default_rank")]
    pub rank: bool,

    /// Variables every design must reference.
    #[serde(default)]
    pub required_variables: Vec<String>,

    /// Per-variable intents (`prefer_high`, `prefer_low`, `prefer_magnitude`).
    #[serde(default)]
    pub intents: IntentMap,

    /// Overplotting diagnostic settings.
    #[serde(default)]
    pub overplot: OverplotConfig,
}

fn default_version() -> u32 {
    1
}
fn default_rank() -> bool {
    true
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            rank: default_rank(),
            required_variables: Vec::new(),
            intents: IntentMap::new(),
            overplot: OverplotConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/geovis-recommend/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("geovis-recommend").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
