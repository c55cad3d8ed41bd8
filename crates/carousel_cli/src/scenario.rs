//! Scenario file handling
//!
//! A scenario describes a carousel and the input fed to it:
//!
//! ```toml
//! items = ["sunrise", "harbour", "dunes"]
//! thumbnails = ["sunrise-sm", "harbour-sm", "dunes-sm"]
//!
//! [carousel]
//! loop = false
//! drag = true
//!
//! [layout]
//! item_width = 400.0
//!
//! [[events]]
//! type = "key"
//! key = "ArrowRight"
//!
//! [[events]]
//! type = "press"
//! x = 500.0
//! ```

use anyhow::{Context, Result};
use carousel_animation::TrackLayout;
use carousel_core::CarouselConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A replayable carousel session
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Item names, in order
    pub items: Vec<String>,
    /// Thumbnail names; empty means each item is its own thumbnail
    #[serde(default)]
    pub thumbnails: Vec<String>,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Seconds per `tick` frame
    #[serde(default = "default_frame")]
    pub frame: f32,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

fn default_frame() -> f32 {
    1.0 / 60.0
}

/// Pixel geometry, see [`TrackLayout`]
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub item_width: f32,
    pub thumbnail_width: f32,
    pub strip_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let layout = TrackLayout::default();
        Self {
            item_width: layout.item_width,
            thumbnail_width: layout.thumbnail_width,
            strip_width: layout.strip_width,
        }
    }
}

impl From<LayoutConfig> for TrackLayout {
    fn from(config: LayoutConfig) -> Self {
        TrackLayout {
            item_width: config.item_width,
            thumbnail_width: config.thumbnail_width,
            strip_width: config.strip_width,
        }
    }
}

/// One input step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// Key press, by DOM-style identifier
    Key { key: String },
    /// Mouse press over the track
    Press { x: f32 },
    /// Mouse move anywhere
    Move { x: f32 },
    /// Mouse release anywhere
    Release { x: f32 },
    TouchStart { id: u64, x: f32 },
    TouchMove { id: u64, x: f32 },
    TouchEnd { id: u64, x: f32 },
    TouchCancel { id: u64 },
    /// Click on a thumbnail
    Thumbnail { index: usize },
    /// Attribute change; omit `value` to remove the attribute
    Attribute {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
    /// Replace the content with `items` generated items
    Load { items: usize },
    /// Advance animations
    Tick {
        #[serde(default = "default_frames")]
        frames: usize,
    },
    /// Detach the carousel from its surface
    Detach,
}

fn default_frames() -> usize {
    1
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a scenario from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        if !(scenario.frame.is_finite() && scenario.frame > 0.0) {
            anyhow::bail!("frame must be a positive number of seconds, got {}", scenario.frame);
        }
        Ok(scenario)
    }
}
