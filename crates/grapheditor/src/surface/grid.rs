use std::rc::Rc;

use log::warn;

use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
    geometry::Point,
    properties::EditorProperties,
};

/// Upper bound on the number of lines drawn, across both axes.
const MAX_GRID_LINES: usize = 4096;

/// Background grid of the surface.
///
/// Draws one line every `grid_spacing` units across its whole size while the
/// editor properties ask for a visible grid.
#[derive(Debug)]
pub(crate) struct Grid {
    root: Visual,
    properties: Option<Rc<EditorProperties>>,
}

impl Grid {
    pub(crate) fn new() -> Self {
        let root = Visual::new("graph-editor-grid");
        root.set_visible(false);
        Self {
            root,
            properties: None,
        }
    }

    pub(crate) fn root(&self) -> &Visual {
        &self.root
    }

    pub(crate) fn set_properties(&mut self, properties: Option<Rc<EditorProperties>>) {
        self.properties = properties;
        self.draw();
    }

    pub(crate) fn resize_relocate(&self, x: f32, y: f32, width: f32, height: f32) {
        self.root.resize_relocate(x, y, width, height);
        self.draw();
    }

    fn draw(&self) {
        let Some(properties) = self.properties.as_ref().filter(|p| p.grid_visible()) else {
            self.root.set_visible(false);
            self.root.set_shape(VisualShape::Empty);
            return;
        };

        let requested = properties.grid_spacing();
        let size = self.root.size();
        if !requested.is_finite() || requested <= 0.0 {
            warn!(spacing = requested; "Grid spacing must be positive, not drawing grid");
            self.root.set_visible(false);
            return;
        }

        let mut spacing = requested;
        while (size.width() / spacing).floor() + (size.height() / spacing).floor()
            > MAX_GRID_LINES as f32
        {
            spacing *= 2.0;
        }
        if spacing != requested {
            warn!(requested, spacing; "Grid too dense for the surface, widening line spacing");
        }

        let color = properties.grid_color().unwrap_or_else(|err| {
            warn!(err:%; "Falling back to default grid color");
            Color::default()
        });

        let mut segments = Vec::new();
        let mut x = spacing;
        while x < size.width() {
            segments.push((Point::new(x, 0.0), Point::new(x, size.height())));
            x += spacing;
        }
        let mut y = spacing;
        while y < size.height() {
            segments.push((Point::new(0.0, y), Point::new(size.width(), y)));
            y += spacing;
        }

        self.root.set_shape(VisualShape::Lines {
            segments,
            stroke: StrokeDefinition::solid(color, 1.0),
        });
        self.root.set_visible(true);
    }

    /// Number of grid lines currently drawn.
    #[cfg(test)]
    fn line_count(&self) -> usize {
        match self.root.shape() {
            VisualShape::Lines { segments, .. } => segments.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_hidden_without_properties() {
        let grid = Grid::new();
        grid.resize_relocate(0.0, 0.0, 100.0, 100.0);
        assert!(!grid.root().is_visible());
        assert_eq!(grid.line_count(), 0);
    }

    #[test]
    fn test_grid_lines_follow_spacing() {
        let mut grid = Grid::new();
        grid.set_properties(Some(Rc::new(
            EditorProperties::default()
                .with_grid_visible(true)
                .with_grid_spacing(10.0),
        )));
        grid.resize_relocate(0.0, 0.0, 35.0, 25.0);

        assert!(grid.root().is_visible());
        // x = 10, 20, 30 and y = 10, 20
        assert_eq!(grid.line_count(), 5);
    }

    #[test]
    fn test_dense_grid_is_capped() {
        let mut grid = Grid::new();
        grid.set_properties(Some(Rc::new(
            EditorProperties::default()
                .with_grid_visible(true)
                .with_grid_spacing(0.5),
        )));
        grid.resize_relocate(0.0, 0.0, 1.0e6, 1.0e6);

        assert!(grid.root().is_visible());
        let lines = grid.line_count();
        assert!(lines > 0);
        assert!(lines <= MAX_GRID_LINES);
    }

    #[test]
    fn test_grid_hidden_again_when_turned_off() {
        let mut grid = Grid::new();
        grid.resize_relocate(0.0, 0.0, 50.0, 50.0);
        grid.set_properties(Some(Rc::new(EditorProperties::default().with_grid_visible(true))));
        assert!(grid.root().is_visible());

        grid.set_properties(Some(Rc::new(EditorProperties::default())));
        assert!(!grid.root().is_visible());
    }
}
