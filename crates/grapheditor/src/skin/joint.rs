use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
    geometry::{Point, Size},
    model::JointId,
};

use crate::{
    context::EditorContext,
    skin::{DisposeError, JointSkin, Skin},
};

/// Edge length of the default joint handle.
pub const DEFAULT_JOINT_SIZE: f32 = 10.0;

/// Default joint skin: a small square handle centered on the joint position.
#[derive(Debug)]
pub struct DefaultJointSkin {
    joint: JointId,
    root: Visual,
    context: Option<EditorContext>,
    initialized: bool,
}

impl DefaultJointSkin {
    pub fn new(joint: JointId) -> Self {
        let root = Visual::new("default-joint");
        root.resize(Size::new(DEFAULT_JOINT_SIZE, DEFAULT_JOINT_SIZE));
        root.set_shape(VisualShape::Rectangle {
            fill: Color::new("#505050").ok(),
            stroke: None,
            corner_radius: 0.0,
        });
        Self {
            joint,
            root,
            context: None,
            initialized: false,
        }
    }

    /// Center of the handle in its parent's coordinates.
    pub fn center(&self) -> Point {
        self.root.bounds().center()
    }
}

impl Skin for DefaultJointSkin {
    fn root(&self) -> &Visual {
        &self.root
    }

    fn set_editor_context(&mut self, context: EditorContext) {
        self.context = Some(context);
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.root.set_on_moved(None);
        self.context = None;
        Ok(())
    }
}

impl JointSkin for DefaultJointSkin {
    fn joint(&self) -> JointId {
        self.joint
    }

    fn initialize(&mut self) {
        let position = self
            .context
            .as_ref()
            .and_then(|context| context.model().joint_position(self.joint));
        if let Some(position) = position {
            let half = Point::new(DEFAULT_JOINT_SIZE / 2.0, DEFAULT_JOINT_SIZE / 2.0);
            self.root.set_position(position.sub_point(half));
        }
        self.initialized = true;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use grapheditor_core::{
        model::{Graph, GraphModel},
        properties::EditorProperties,
    };

    use super::*;

    #[test]
    fn test_initialize_centers_on_model_position() {
        let graph = Rc::new(Graph::new());
        let a = graph.add_node("a", Point::default(), Size::new(10.0, 10.0));
        let b = graph.add_node("b", Point::default(), Size::new(10.0, 10.0));
        let out = graph.add_connector(a, "out", Default::default());
        let input = graph.add_connector(b, "in", Default::default());
        let connection = graph.connect("c", out, input, &[Point::new(50.0, 20.0)]);
        let joint = graph.joints(connection)[0];

        let model: Rc<dyn GraphModel> = graph.clone();
        let mut skin = DefaultJointSkin::new(joint);
        skin.set_editor_context(EditorContext::new(
            model,
            Rc::new(EditorProperties::default()),
        ));
        assert!(!skin.is_initialized());

        skin.initialize();
        assert!(skin.is_initialized());
        assert_eq!(skin.root().position(), Point::new(45.0, 15.0));
        assert_eq!(skin.center(), Point::new(50.0, 20.0));
    }

    #[test]
    fn test_initialize_without_context_only_marks_initialized() {
        let mut skin = DefaultJointSkin::new(JointId::new("loose"));
        skin.initialize();
        assert!(skin.is_initialized());
        assert_eq!(skin.root().position(), Point::default());
    }
}
