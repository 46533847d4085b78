use std::fmt;

use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
    geometry::Point,
    model::{ConnectorKind, NodeId},
};

use crate::{
    context::EditorContext,
    skin::{ConnectorSkinRef, DisposeError, NodeSkin, Skin},
};

const NODE_FILL: &str = "#ffffff";
const NODE_OUTLINE: &str = "#505050";
const NODE_CORNER_RADIUS: f32 = 4.0;

/// Default node skin: a rounded rectangle with inputs on its left edge and
/// outputs on its right edge.
pub struct DefaultNodeSkin {
    node: NodeId,
    root: Visual,
    context: Option<EditorContext>,
    connector_skins: Vec<ConnectorSkinRef>,
}

impl DefaultNodeSkin {
    pub fn new(node: NodeId) -> Self {
        let root = Visual::new("default-node");
        root.set_shape(VisualShape::Rectangle {
            fill: Color::new(NODE_FILL).ok(),
            stroke: Color::new(NODE_OUTLINE)
                .ok()
                .map(|color| StrokeDefinition::solid(color, 1.0)),
            corner_radius: NODE_CORNER_RADIUS,
        });
        Self {
            node,
            root,
            context: None,
            connector_skins: Vec::new(),
        }
    }

    /// Spreads the connectors evenly along their edge of the node.
    fn layout_connectors(&self) {
        let size = self.root.size();
        let kind_of = |skin: &ConnectorSkinRef| {
            let connector = skin.borrow().connector();
            self.context
                .as_ref()
                .map(|context| context.model().connector_kind(connector))
                .unwrap_or_default()
        };

        for kind in [ConnectorKind::Input, ConnectorKind::Output] {
            let side: Vec<_> = self
                .connector_skins
                .iter()
                .filter(|skin| kind_of(*skin) == kind)
                .collect();
            let step = size.height() / (side.len() + 1) as f32;

            for (index, skin) in side.into_iter().enumerate() {
                let skin = skin.borrow();
                let connector_size = skin.root().size();
                let x = match kind {
                    ConnectorKind::Input => -connector_size.width() / 2.0,
                    ConnectorKind::Output => size.width() - connector_size.width() / 2.0,
                };
                let y = step * (index + 1) as f32 - connector_size.height() / 2.0;
                skin.root().set_position(Point::new(x, y));
            }
        }
    }
}

impl fmt::Debug for DefaultNodeSkin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultNodeSkin")
            .field("node", &self.node)
            .field("root", &self.root)
            .field("connectors", &self.connector_skins.len())
            .finish()
    }
}

impl Skin for DefaultNodeSkin {
    fn root(&self) -> &Visual {
        &self.root
    }

    fn set_editor_context(&mut self, context: EditorContext) {
        self.context = Some(context);
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.root.set_on_moved(None);
        self.root.clear_children();
        self.connector_skins.clear();
        self.context = None;
        Ok(())
    }
}

impl NodeSkin for DefaultNodeSkin {
    fn node(&self) -> NodeId {
        self.node
    }

    fn initialize(&mut self) {
        let bounds = self
            .context
            .as_ref()
            .and_then(|context| context.model().node_bounds(self.node));
        if let Some(bounds) = bounds {
            self.root.resize_relocate(
                bounds.min_x(),
                bounds.min_y(),
                bounds.width(),
                bounds.height(),
            );
        }
        self.layout_connectors();
    }

    fn set_connector_skins(&mut self, connector_skins: Vec<ConnectorSkinRef>) {
        for skin in &self.connector_skins {
            self.root.remove_child(skin.borrow().root());
        }
        for skin in &connector_skins {
            self.root.add_child(skin.borrow().root());
        }
        self.connector_skins = connector_skins;
        self.layout_connectors();
    }

    fn connector_skins(&self) -> Vec<ConnectorSkinRef> {
        self.connector_skins.clone()
    }
}
