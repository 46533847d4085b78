//! Per-editor context handed to every skin.

use std::{fmt, rc::Rc};

use grapheditor_core::{model::GraphModel, properties::EditorProperties};

/// What a skin can reach of the editor it belongs to.
///
/// Cloning is cheap: both parts are shared.
#[derive(Clone)]
pub struct EditorContext {
    model: Rc<dyn GraphModel>,
    properties: Rc<EditorProperties>,
}

impl EditorContext {
    pub fn new(model: Rc<dyn GraphModel>, properties: Rc<EditorProperties>) -> Self {
        Self { model, properties }
    }

    /// The graph model the editor displays.
    pub fn model(&self) -> &Rc<dyn GraphModel> {
        &self.model
    }

    /// The editor-wide properties.
    pub fn properties(&self) -> &Rc<EditorProperties> {
        &self.properties
    }

    pub(crate) fn set_properties(&mut self, properties: Rc<EditorProperties>) {
        self.properties = properties;
    }
}

impl fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorContext")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}
