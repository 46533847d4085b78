use grapheditor_core::{
    color::Color,
    draw::{StrokeDefinition, Visual, VisualShape},
    geometry::Size,
    model::ConnectorId,
};

use crate::{
    context::EditorContext,
    skin::{ConnectorSkin, DisposeError, Skin},
};

/// Edge length of the default connector square.
pub const DEFAULT_CONNECTOR_SIZE: f32 = 12.0;

/// Default connector skin: a small filled square.
#[derive(Debug)]
pub struct DefaultConnectorSkin {
    connector: ConnectorId,
    root: Visual,
    context: Option<EditorContext>,
}

impl DefaultConnectorSkin {
    pub fn new(connector: ConnectorId) -> Self {
        let root = Visual::new("default-connector");
        root.resize(Size::new(DEFAULT_CONNECTOR_SIZE, DEFAULT_CONNECTOR_SIZE));
        root.set_shape(VisualShape::Rectangle {
            fill: Color::new("#8fb1d8").ok(),
            stroke: Some(StrokeDefinition::default()),
            corner_radius: 0.0,
        });
        Self {
            connector,
            root,
            context: None,
        }
    }
}

impl Skin for DefaultConnectorSkin {
    fn root(&self) -> &Visual {
        &self.root
    }

    fn set_editor_context(&mut self, context: EditorContext) {
        self.context = Some(context);
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.context = None;
        Ok(())
    }
}

impl ConnectorSkin for DefaultConnectorSkin {
    fn connector(&self) -> ConnectorId {
        self.connector
    }
}
