//! Graph editor view core.
//!
//! Keeps the view of an interactive graph editor in step with its model:
//! every displayed node, connector, connection and joint gets a skin, and the
//! skins' visuals are placed on a layered drawing surface.
//!
//! - [`registry::SkinRegistry`] creates, resynchronizes and disposes skins
//!   and routes "skin moved" notifications to a
//!   [`layouter::ConnectionLayouter`].
//! - [`surface::LayeredSurface`] holds the grid, the connection layer, the
//!   node layer and the selection box in a fixed z-order.
//! - [`GraphEditor`] composes both over a [`model::GraphModel`] and applies
//!   [`ModelChange`] batches to them.

pub mod config;
pub mod context;
pub mod layouter;
pub mod registry;
pub mod skin;
pub mod surface;

mod change;
mod error;

pub use grapheditor_core::{color, draw, geometry, identifier, model, properties};

pub use change::ModelChange;
pub use error::{GraphEditorError, RegistryError};

use std::{fmt, rc::Rc};

use indexmap::IndexSet;
use log::{debug, info};

use config::EditorConfig;
use context::EditorContext;
use layouter::ConnectionLayouter;
use model::{GraphModel, JointId, NodeId};
use properties::EditorProperties;
use registry::SkinRegistry;
use surface::LayeredSurface;

/// Editor view controller.
///
/// Owns the skin registry and the surface and keeps the surface's layers
/// holding exactly the root visuals of the registered node, connection and
/// joint skins.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use grapheditor::{GraphEditor, ModelChange, config::EditorConfig};
/// use grapheditor_core::{
///     geometry::{Point, Size},
///     model::{ConnectorKind, Graph, GraphModel},
/// };
///
/// let graph = Rc::new(Graph::new());
/// let a = graph.add_node("a", Point::new(20.0, 20.0), Size::new(80.0, 40.0));
/// let b = graph.add_node("b", Point::new(200.0, 20.0), Size::new(80.0, 40.0));
/// let out = graph.add_connector(a, "out", ConnectorKind::Output);
/// let input = graph.add_connector(b, "in", ConnectorKind::Input);
/// let connection = graph.connect("a-b", out, input, &[Point::new(150.0, 40.0)]);
///
/// let model: Rc<dyn GraphModel> = graph.clone();
/// let mut editor = GraphEditor::new(EditorConfig::default(), model);
/// editor
///     .apply(
///         &ModelChange::new()
///             .with_added_nodes([a, b])
///             .with_added_connections([connection]),
///     )
///     .expect("Failed to apply change");
///
/// assert_eq!(editor.surface().node_layer().child_count(), 2);
/// // The connection and its joint.
/// assert_eq!(editor.surface().connection_layer().child_count(), 2);
/// ```
pub struct GraphEditor {
    model: Rc<dyn GraphModel>,
    registry: SkinRegistry,
    surface: LayeredSurface,
}

impl GraphEditor {
    /// Create a new editor over `model`.
    ///
    /// # Arguments
    ///
    /// * `config` - Editor properties and initial surface settings
    /// * `model` - The graph model to display
    pub fn new(config: EditorConfig, model: Rc<dyn GraphModel>) -> Self {
        let properties = Rc::new(config.properties().clone());
        let registry = SkinRegistry::new(EditorContext::new(
            Rc::clone(&model),
            Rc::clone(&properties),
        ));

        let mut surface = LayeredSurface::new();
        surface.set_editor_properties(Some(properties));
        surface.resize(config.surface().width(), config.surface().height());
        surface.set_content_cache(config.surface().content_cache());

        debug!(
            width = config.surface().width(),
            height = config.surface().height();
            "Created graph editor"
        );
        Self {
            model,
            registry,
            surface,
        }
    }

    pub fn model(&self) -> &Rc<dyn GraphModel> {
        &self.model
    }

    pub fn registry(&self) -> &SkinRegistry {
        &self.registry
    }

    /// Mutable access to the registry, e.g. to register skin factories.
    pub fn registry_mut(&mut self) -> &mut SkinRegistry {
        &mut self.registry
    }

    pub fn surface(&self) -> &LayeredSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut LayeredSurface {
        &mut self.surface
    }

    /// Sets the connection layouter on both the registry and the surface.
    pub fn set_connection_layouter(&mut self, layouter: Option<Rc<dyn ConnectionLayouter>>) {
        self.registry.set_connection_layouter(layouter.clone());
        self.surface.set_connection_layouter(layouter);
    }

    /// Replaces the editor properties of the surface and of every skin.
    pub fn set_editor_properties(&mut self, properties: EditorProperties) {
        let properties = Rc::new(properties);
        self.registry.set_editor_properties(Rc::clone(&properties));
        self.surface.set_editor_properties(Some(properties));
    }

    /// Applies a batch of model edits to the registry and the surface.
    ///
    /// Removals run first (connections, joints, nodes), then added nodes,
    /// updated nodes, added connections and added joints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphEditorError::Registry`] if a skin fails to dispose. The
    /// change is then only partially applied.
    pub fn apply(&mut self, change: &ModelChange) -> Result<(), GraphEditorError> {
        if change.is_empty() {
            return Ok(());
        }
        debug!(
            added_nodes = change.added_nodes().len(),
            removed_nodes = change.removed_nodes().len(),
            added_connections = change.added_connections().len(),
            removed_connections = change.removed_connections().len();
            "Applying model change"
        );

        for &connection in change.removed_connections() {
            if let Some(skin) = self.registry.lookup_connection(connection) {
                self.surface.remove_connection(&skin);
            }
        }
        self.registry
            .remove_connections(change.removed_connections())?;

        for &joint in change.removed_joints() {
            if let Some(skin) = self.registry.lookup_joint(joint) {
                self.surface.remove_joint(&skin);
            }
        }
        self.registry.remove_joints(change.removed_joints())?;

        for &node in change.removed_nodes() {
            if let Some(skin) = self.registry.lookup_node(node) {
                self.surface.remove_node(&skin);
            }
            self.detach_tails(node);
        }
        self.registry.remove_nodes(change.removed_nodes())?;

        let new_nodes: IndexSet<NodeId> = change
            .added_nodes()
            .iter()
            .copied()
            .filter(|&node| self.registry.lookup_node(node).is_none())
            .collect();
        self.registry.add_nodes(change.added_nodes());
        for node in new_nodes {
            if let Some(skin) = self.registry.lookup_node(node) {
                self.surface.add_node(&skin);
            }
        }

        for &node in change.updated_nodes() {
            self.detach_tails(node);
        }
        self.registry.update_nodes(change.updated_nodes())?;

        let new_connections: IndexSet<_> = change
            .added_connections()
            .iter()
            .copied()
            .filter(|&connection| self.registry.lookup_connection(connection).is_none())
            .collect();
        let new_joints = self.unregistered_joints(
            change
                .added_connections()
                .iter()
                .flat_map(|&connection| self.model.joints(connection)),
        );
        self.registry.add_connections(change.added_connections());
        for connection in new_connections {
            if let Some(skin) = self.registry.lookup_connection(connection) {
                self.surface.add_connection(&skin);
            }
        }
        self.attach_joints(new_joints);

        for (connection, joints) in change.added_joints() {
            let new_joints = self.unregistered_joints(joints.iter().copied());
            self.registry.add_joints(*connection, joints);
            self.attach_joints(new_joints);
        }

        Ok(())
    }

    /// Discards every skin and rebuilds the view from the whole model.
    ///
    /// # Errors
    ///
    /// Returns [`GraphEditorError::Registry`] if a skin fails to dispose.
    pub fn reload(&mut self) -> Result<(), GraphEditorError> {
        info!("Reloading graph editor from model");

        self.surface.clear();
        self.registry.remove_all()?;

        let change = ModelChange::new()
            .with_added_nodes(self.model.nodes())
            .with_added_connections(self.model.all_connections());
        self.apply(&change)?;
        self.registry.initialize_all();

        info!(
            nodes = self.registry.nodes().len(),
            connections = self.registry.connections().len();
            "Graph editor reloaded"
        );
        Ok(())
    }

    /// Lays the surface out. See [`LayeredSurface::layout`].
    pub fn layout(&self) {
        self.surface.layout();
    }

    /// Renders the surface to an SVG document.
    pub fn render_svg(&self) -> String {
        self.surface.render_svg()
    }

    fn unregistered_joints(&self, joints: impl IntoIterator<Item = JointId>) -> IndexSet<JointId> {
        joints
            .into_iter()
            .filter(|&joint| self.registry.lookup_joint(joint).is_none())
            .collect()
    }

    fn attach_joints(&self, joints: IndexSet<JointId>) {
        for joint in joints {
            if let Some(skin) = self.registry.lookup_joint(joint) {
                self.surface.add_joint(&skin);
            }
        }
    }

    /// Takes the tails of `node`'s connectors off the surface.
    fn detach_tails(&self, node: NodeId) {
        for connector in self.registry.node_connectors(node) {
            if let Some(tail) = self.registry.lookup_tail(connector) {
                self.surface.remove_tail(&tail);
            }
        }
    }
}

impl fmt::Debug for GraphEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphEditor")
            .field("registry", &self.registry)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}
