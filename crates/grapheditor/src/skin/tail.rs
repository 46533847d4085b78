use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
    geometry::Point,
    model::ConnectorId,
};

use crate::{
    context::EditorContext,
    skin::{DisposeError, Skin, TailSkin},
};

/// Default tail skin: a dashed line, hidden until it is first drawn.
#[derive(Debug)]
pub struct DefaultTailSkin {
    connector: ConnectorId,
    root: Visual,
    context: Option<EditorContext>,
}

impl DefaultTailSkin {
    pub fn new(connector: ConnectorId) -> Self {
        let root = Visual::new("default-tail");
        root.set_visible(false);
        Self {
            connector,
            root,
            context: None,
        }
    }
}

impl Skin for DefaultTailSkin {
    fn root(&self) -> &Visual {
        &self.root
    }

    fn set_editor_context(&mut self, context: EditorContext) {
        self.context = Some(context);
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.root.set_visible(false);
        self.context = None;
        Ok(())
    }
}

impl TailSkin for DefaultTailSkin {
    fn connector(&self) -> ConnectorId {
        self.connector
    }

    fn draw(&mut self, start: Point, end: Point) {
        let color = Color::new("#505050").unwrap_or_default();
        self.root.set_shape(VisualShape::Polyline {
            points: vec![start, end],
            stroke: StrokeDefinition::dashed(color, 1.5),
        });
        self.root.set_visible(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_is_hidden_until_drawn() {
        let mut tail = DefaultTailSkin::new(ConnectorId::new("n::out"));
        assert!(!tail.root().is_visible());
        assert!(tail.root().render().is_none());

        tail.draw(Point::new(0.0, 0.0), Point::new(30.0, 10.0));
        assert!(tail.root().is_visible());
        let rendered = tail.root().render().map(|node| node.to_string());
        assert!(rendered.is_some_and(|svg| svg.contains("stroke-dasharray")));
    }
}
