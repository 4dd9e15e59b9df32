// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewer configuration.
//!
//! Stored as RON next to the deck. Every field has a default matching the
//! stock presentation page, so an empty `()` file is a valid configuration.

use crate::autoplay::AutoplayConfig;
use crate::error::{DeckError, Result};
use crate::viewport::ViewBox;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Element ids and timing used by a viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Format version
    pub version: u32,
    /// Id of the vector graphic being driven
    pub surface_id: String,
    /// Id of the slide position text element
    pub position_display_id: String,
    /// Id of the autoplay interval text element
    pub speed_display_id: String,
    /// Initial `viewBox` of the surface, enabling pan and zoom
    pub view_box: Option<String>,
    /// Zoom factor per wheel delta unit
    pub zoom_sensitivity: f64,
    /// Autoplay timing
    pub autoplay: AutoplayConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            surface_id: "slides".into(),
            position_display_id: "slide_counter".into(),
            speed_display_id: "speed_tracker".into(),
            view_box: None,
            zoom_sensitivity: 0.001,
            autoplay: AutoplayConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate RON text
    pub fn from_ron(source: &str) -> Result<Self> {
        let config: ViewerConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::info!("Loaded viewer configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let content = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Parsed initial view box, if configured
    pub fn initial_view_box(&self) -> Result<Option<ViewBox>> {
        self.view_box.as_deref().map(str::parse).transpose()
    }

    /// Check version, ids and timing
    pub fn validate(&self) -> Result<()> {
        if self.version > CONFIG_FORMAT_VERSION {
            return Err(DeckError::InvalidConfig(format!(
                "config version {} is newer than supported version {}",
                self.version, CONFIG_FORMAT_VERSION
            )));
        }
        if self.surface_id.is_empty() {
            return Err(DeckError::InvalidConfig("surface_id is empty".into()));
        }
        if !self.zoom_sensitivity.is_finite() {
            return Err(DeckError::InvalidConfig("zoom_sensitivity is not finite".into()));
        }
        self.initial_view_box()?;
        self.autoplay.validate()
    }
}
