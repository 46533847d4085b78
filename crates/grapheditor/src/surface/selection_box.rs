use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
};

/// Rubber-band rectangle drawn over everything else while selecting.
#[derive(Debug)]
pub(crate) struct SelectionBox {
    root: Visual,
}

impl SelectionBox {
    pub(crate) fn new() -> Self {
        let root = Visual::new("graph-editor-selection-box");
        let color = Color::new("#1e90ff").unwrap_or_default();
        root.set_shape(VisualShape::Rectangle {
            fill: Some(color.with_alpha(0.15)),
            stroke: Some(StrokeDefinition::dashed(color, 1.0)),
            corner_radius: 0.0,
        });
        root.set_visible(false);
        Self { root }
    }

    pub(crate) fn root(&self) -> &Visual {
        &self.root
    }

    /// Shows the box. A negative width or height extends it left or up from
    /// the anchor.
    pub(crate) fn draw(&self, x: f32, y: f32, width: f32, height: f32) {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
        self.root.resize_relocate(x, y, width, height);
        self.root.set_visible(true);
    }

    pub(crate) fn hide(&self) {
        self.root.set_visible(false);
    }
}
