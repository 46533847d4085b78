use std::fmt;

use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
    geometry::Point,
    model::ConnectionId,
};

use crate::{
    context::EditorContext,
    skin::{ConnectionSkin, DisposeError, JointSkinRef, Skin},
};

/// Default connection skin: a polyline through the centers of its joints.
///
/// End points on the connectors are left to the connection layouter, which
/// knows where the connectors are on the surface.
pub struct DefaultConnectionSkin {
    connection: ConnectionId,
    root: Visual,
    context: Option<EditorContext>,
    joint_skins: Vec<JointSkinRef>,
}

impl DefaultConnectionSkin {
    pub fn new(connection: ConnectionId) -> Self {
        Self {
            connection,
            root: Visual::new("default-connection"),
            context: None,
            joint_skins: Vec::new(),
        }
    }

    /// The points the path currently runs through.
    pub fn path(&self) -> Vec<Point> {
        match self.root.shape() {
            VisualShape::Polyline { points, .. } => points,
            _ => Vec::new(),
        }
    }

    fn update_path(&self) {
        let points: Vec<Point> = self
            .joint_skins
            .iter()
            .map(|skin| skin.borrow().root().bounds().center())
            .collect();

        if points.len() < 2 {
            self.root.set_shape(VisualShape::Empty);
            return;
        }
        let color = Color::new("#505050").unwrap_or_default();
        self.root.set_shape(VisualShape::Polyline {
            points,
            stroke: StrokeDefinition::solid(color, 1.5),
        });
    }
}

impl fmt::Debug for DefaultConnectionSkin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultConnectionSkin")
            .field("connection", &self.connection)
            .field("root", &self.root)
            .field("joints", &self.joint_skins.len())
            .finish()
    }
}

impl Skin for DefaultConnectionSkin {
    fn root(&self) -> &Visual {
        &self.root
    }

    fn set_editor_context(&mut self, context: EditorContext) {
        self.context = Some(context);
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.joint_skins.clear();
        self.root.set_shape(VisualShape::Empty);
        self.context = None;
        Ok(())
    }
}

impl ConnectionSkin for DefaultConnectionSkin {
    fn connection(&self) -> ConnectionId {
        self.connection
    }

    fn set_joint_skins(&mut self, joint_skins: Vec<JointSkinRef>) {
        self.joint_skins = joint_skins;
        self.update_path();
    }

    fn joint_skins(&self) -> Vec<JointSkinRef> {
        self.joint_skins.clone()
    }

    fn draw(&mut self) {
        for skin in &self.joint_skins {
            // A joint borrowed elsewhere is being moved and already has its position.
            let Ok(mut joint) = skin.try_borrow_mut() else {
                continue;
            };
            if !joint.is_initialized() {
                joint.initialize();
            }
        }
        self.update_path();
    }
}
