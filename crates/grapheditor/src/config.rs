//! Configuration types for the graph editor.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! TOML or any other serde format. Every field has a default, so an empty
//! document is a valid configuration.
//!
//! # Overview
//!
//! - [`EditorConfig`] - Top-level configuration combining editor properties and surface settings.
//! - [`SurfaceConfig`] - Initial surface size and content caching.
//!
//! # Example
//!
//! ```
//! # use grapheditor::config::EditorConfig;
//! let config = EditorConfig::default();
//! assert_eq!(config.surface().width(), 800.0);
//! assert!(!config.properties().grid_visible());
//! ```

use serde::Deserialize;

use grapheditor_core::properties::EditorProperties;

const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
const DEFAULT_SURFACE_HEIGHT: f32 = 600.0;

fn default_surface_width() -> f32 {
    DEFAULT_SURFACE_WIDTH
}

fn default_surface_height() -> f32 {
    DEFAULT_SURFACE_HEIGHT
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorConfig {
    /// Grid, snapping and bounds settings shared with every skin.
    #[serde(default)]
    properties: EditorProperties,

    /// Surface configuration section.
    #[serde(default)]
    surface: SurfaceConfig,
}

impl EditorConfig {
    /// Creates a new [`EditorConfig`].
    pub fn new(properties: EditorProperties, surface: SurfaceConfig) -> Self {
        Self {
            properties,
            surface,
        }
    }

    /// Returns the editor properties.
    pub fn properties(&self) -> &EditorProperties {
        &self.properties
    }

    /// Returns the surface configuration.
    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }
}

/// Initial surface settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_surface_width")]
    width: f32,

    #[serde(default = "default_surface_height")]
    height: f32,

    /// Caching hint forwarded to both content layers.
    #[serde(default)]
    content_cache: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            content_cache: false,
        }
    }
}

impl SurfaceConfig {
    /// Creates a new [`SurfaceConfig`].
    pub fn new(width: f32, height: f32, content_cache: bool) -> Self {
        Self {
            width,
            height,
            content_cache,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn content_cache(&self) -> bool {
        self.content_cache
    }
}
