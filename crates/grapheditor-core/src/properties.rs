//! Editor-wide properties shared by the surface, the grid and movable skins.
//!
//! One [`EditorProperties`] instance is created per editor and handed out as an
//! `Rc`. It implements [`serde::Deserialize`] so hosts can load it from their
//! own configuration files.

use serde::Deserialize;

use crate::{
    color::Color,
    geometry::{Point, Size},
};

/// Default spacing between grid lines, in editor units.
pub const DEFAULT_GRID_SPACING: f32 = 12.0;

/// Default distance moved elements keep from the edges of their container.
pub const DEFAULT_BOUND_INSET: f32 = 15.0;

/// Default maximum surface width and height.
pub const DEFAULT_MAX_EXTENT: f32 = 1_000_000.0;

const DEFAULT_GRID_COLOR: &str = "#e0e0e0";

fn default_grid_spacing() -> f32 {
    DEFAULT_GRID_SPACING
}

fn default_bound_inset() -> f32 {
    DEFAULT_BOUND_INSET
}

fn default_max_extent() -> f32 {
    DEFAULT_MAX_EXTENT
}

/// Grid, snapping and bounds settings for one editor.
///
/// # Example
///
/// ```
/// # use grapheditor_core::properties::EditorProperties;
/// let properties = EditorProperties::default()
///     .with_grid_visible(true)
///     .with_snap_to_grid(true);
/// assert!(properties.grid_visible());
/// assert_eq!(properties.grid_spacing(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditorProperties {
    /// Whether the background grid is drawn.
    #[serde(default)]
    grid_visible: bool,

    /// Whether relocated elements snap to the grid.
    #[serde(default)]
    snap_to_grid: bool,

    /// Distance between grid lines.
    #[serde(default = "default_grid_spacing")]
    grid_spacing: f32,

    /// Grid line color, as a CSS color string.
    #[serde(default)]
    grid_color: Option<String>,

    /// Whether relocated elements are kept inside their container.
    #[serde(default)]
    bounds_active: bool,

    /// Distance kept from the container edges when bounds are active.
    #[serde(default = "default_bound_inset")]
    bound_inset: f32,

    /// Maximum surface width.
    #[serde(default = "default_max_extent")]
    max_width: f32,

    /// Maximum surface height.
    #[serde(default = "default_max_extent")]
    max_height: f32,
}

impl Default for EditorProperties {
    fn default() -> Self {
        Self {
            grid_visible: false,
            snap_to_grid: false,
            grid_spacing: DEFAULT_GRID_SPACING,
            grid_color: None,
            bounds_active: false,
            bound_inset: DEFAULT_BOUND_INSET,
            max_width: DEFAULT_MAX_EXTENT,
            max_height: DEFAULT_MAX_EXTENT,
        }
    }
}

impl EditorProperties {
    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    pub fn bounds_active(&self) -> bool {
        self.bounds_active
    }

    pub fn bound_inset(&self) -> f32 {
        self.bound_inset
    }

    /// Maximum size the surface may grow to.
    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Returns the parsed grid [`Color`], falling back to a light gray.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn grid_color(&self) -> Result<Color, String> {
        let color_str = self.grid_color.as_deref().unwrap_or(DEFAULT_GRID_COLOR);
        Color::new(color_str).map_err(|err| format!("Invalid grid color in config: {err}"))
    }

    pub fn with_grid_visible(mut self, visible: bool) -> Self {
        self.grid_visible = visible;
        self
    }

    pub fn with_snap_to_grid(mut self, snap: bool) -> Self {
        self.snap_to_grid = snap;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f32) -> Self {
        self.grid_spacing = spacing;
        self
    }

    pub fn with_grid_color(mut self, color: impl Into<String>) -> Self {
        self.grid_color = Some(color.into());
        self
    }

    pub fn with_bounds(mut self, active: bool, inset: f32) -> Self {
        self.bounds_active = active;
        self.bound_inset = inset;
        self
    }

    /// Applies grid snapping and container bounds to a requested position.
    ///
    /// `element` is the size of the element being moved and `container` the
    /// size of its parent, if it has one.
    pub fn constrain(&self, requested: Point, element: Size, container: Option<Size>) -> Point {
        let mut position = requested;
        if self.snap_to_grid {
            position = position.snap_to(self.grid_spacing);
        }
        if let Some(container) = container.filter(|_| self.bounds_active) {
            let inset = self.bound_inset;
            let min = Point::new(inset, inset);
            let max = Point::new(
                container.width() - element.width() - inset,
                container.height() - element.height() - inset,
            );
            position = position.clamp(min, max);
        }
        position
    }
}
