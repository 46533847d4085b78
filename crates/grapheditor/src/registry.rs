//! The skin registry.
//!
//! [`SkinRegistry`] owns one skin per displayed model element, in five maps
//! keyed by element identity (nodes, connectors, connections, joints and the
//! tails of connectors). It is fed batches of added, removed and updated
//! elements and keeps the maps in step with them:
//!
//! - adding an element creates its skin once, through the registered factory
//!   or the default skin, and binds it to the editor;
//! - removing an element drops its skin from the map and disposes it;
//! - node and connection skins are handed the current skins of their
//!   connectors and joints whenever those change.
//!
//! Movable skins (nodes and joints) report relocations through a shared
//! [`MoveNotifier`]. The registry routes them to the
//! [`ConnectionLayouter`], asking it to redraw only the connections that
//! depend on the moved element.

mod skin_map;

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use grapheditor_core::{
    model::{ConnectionId, ConnectorId, GraphModel, JointId, NodeId},
    properties::EditorProperties,
};

use crate::{
    context::EditorContext,
    error::RegistryError,
    layouter::ConnectionLayouter,
    skin::{
        ConnectionSkin, ConnectionSkinRef, ConnectorSkin, ConnectorSkinRef,
        DefaultConnectionSkin, DefaultConnectorSkin, DefaultJointSkin, DefaultNodeSkin,
        DefaultTailSkin, JointSkin, JointSkinRef, MoveNotifier, MovedSkin, NodeSkin, NodeSkinRef,
        Skin, SkinKind, TailSkin, TailSkinRef,
    },
};

use skin_map::SkinMap;

/// Creates a custom skin for an element, or declines with `None`.
pub type SkinFactory<K, S> = Box<dyn Fn(K) -> Option<Rc<RefCell<S>>>>;

pub type NodeSkinFactory = SkinFactory<NodeId, dyn NodeSkin>;
pub type ConnectorSkinFactory = SkinFactory<ConnectorId, dyn ConnectorSkin>;
pub type ConnectionSkinFactory = SkinFactory<ConnectionId, dyn ConnectionSkin>;
pub type JointSkinFactory = SkinFactory<JointId, dyn JointSkin>;
pub type TailSkinFactory = SkinFactory<ConnectorId, dyn TailSkin>;

fn default_node_skin(node: NodeId) -> NodeSkinRef {
    Rc::new(RefCell::new(DefaultNodeSkin::new(node)))
}

fn default_connector_skin(connector: ConnectorId) -> ConnectorSkinRef {
    Rc::new(RefCell::new(DefaultConnectorSkin::new(connector)))
}

fn default_connection_skin(connection: ConnectionId) -> ConnectionSkinRef {
    Rc::new(RefCell::new(DefaultConnectionSkin::new(connection)))
}

fn default_joint_skin(joint: JointId) -> JointSkinRef {
    Rc::new(RefCell::new(DefaultJointSkin::new(joint)))
}

fn default_tail_skin(connector: ConnectorId) -> TailSkinRef {
    Rc::new(RefCell::new(DefaultTailSkin::new(connector)))
}

#[derive(Default)]
struct SkinFactories {
    node: Option<NodeSkinFactory>,
    connector: Option<ConnectorSkinFactory>,
    connection: Option<ConnectionSkinFactory>,
    joint: Option<JointSkinFactory>,
    tail: Option<TailSkinFactory>,
}

/// Creates skins and runs the creation protocol on them.
struct SkinBuilder {
    factories: SkinFactories,
    context: EditorContext,
    notifier: MoveNotifier,
}

impl SkinBuilder {
    /// Asks the factory, falls back to the default, then binds the context.
    fn create<K, S>(
        &self,
        kind: SkinKind,
        key: K,
        factory: Option<&SkinFactory<K, S>>,
        fallback: fn(K) -> Rc<RefCell<S>>,
    ) -> Rc<RefCell<S>>
    where
        K: Copy + fmt::Display,
        S: Skin + ?Sized,
    {
        let skin = match factory.and_then(|factory| factory(key)) {
            Some(skin) => skin,
            None => fallback(key),
        };
        skin.borrow_mut().set_editor_context(self.context.clone());
        trace!(kind:% = kind, element:% = key; "Created skin");
        skin
    }

    fn create_node(&self, node: NodeId) -> NodeSkinRef {
        let skin = self.create(
            SkinKind::Node,
            node,
            self.factories.node.as_ref(),
            default_node_skin,
        );
        {
            let mut skin = skin.borrow_mut();
            skin.root()
                .set_editor_properties(Some(Rc::clone(self.context.properties())));
            skin.set_move_notifier(self.notifier.clone());
            skin.initialize();
        }
        skin
    }

    fn create_connector(&self, connector: ConnectorId) -> ConnectorSkinRef {
        self.create(
            SkinKind::Connector,
            connector,
            self.factories.connector.as_ref(),
            default_connector_skin,
        )
    }

    fn create_tail(&self, connector: ConnectorId) -> TailSkinRef {
        self.create(
            SkinKind::Tail,
            connector,
            self.factories.tail.as_ref(),
            default_tail_skin,
        )
    }

    fn create_connection(&self, connection: ConnectionId) -> ConnectionSkinRef {
        self.create(
            SkinKind::Connection,
            connection,
            self.factories.connection.as_ref(),
            default_connection_skin,
        )
    }

    /// Joint skins are not initialized here; see [`SkinRegistry::initialize_all`].
    fn create_joint(&self, joint: JointId) -> JointSkinRef {
        let skin = self.create(
            SkinKind::Joint,
            joint,
            self.factories.joint.as_ref(),
            default_joint_skin,
        );
        {
            let mut skin = skin.borrow_mut();
            skin.root()
                .set_editor_properties(Some(Rc::clone(self.context.properties())));
            skin.set_move_notifier(self.notifier.clone());
        }
        skin
    }
}

/// Turns move notifications into redraw requests.
///
/// Lives outside the registry so that a notification fired while the
/// registry is busy never needs to borrow it.
struct MoveRouter {
    model: Rc<dyn GraphModel>,
    layouter: RefCell<Option<Rc<dyn ConnectionLayouter>>>,
}

impl MoveRouter {
    fn route(&self, moved: MovedSkin) {
        let layouter = self.layouter.borrow().clone();
        let Some(layouter) = layouter else {
            trace!(moved:?; "No connection layouter, dropping move notification");
            return;
        };

        let connections: IndexSet<ConnectionId> = match moved {
            MovedSkin::Node(node) => self
                .model
                .connectors(node)
                .into_iter()
                .flat_map(|connector| self.model.connections(connector))
                .collect(),
            MovedSkin::Joint(joint) => self.model.joint_connection(joint).into_iter().collect(),
        };
        if connections.is_empty() {
            return;
        }

        let connections: Vec<ConnectionId> = connections.into_iter().collect();
        trace!(moved:?, count = connections.len(); "Redrawing connections after move");
        layouter.redraw(&connections);
    }
}

/// Owns the skins of every displayed model element.
///
/// # Example
///
/// ```
/// # use std::rc::Rc;
/// # use grapheditor::{context::EditorContext, registry::SkinRegistry};
/// # use grapheditor_core::{
/// #     geometry::{Point, Size},
/// #     model::{ConnectorKind, Graph, GraphModel},
/// #     properties::EditorProperties,
/// # };
/// let graph = Rc::new(Graph::new());
/// let node = graph.add_node("a", Point::default(), Size::new(80.0, 40.0));
/// let connector = graph.add_connector(node, "out", ConnectorKind::Output);
///
/// let model: Rc<dyn GraphModel> = graph.clone();
/// let mut registry = SkinRegistry::new(EditorContext::new(
///     model,
///     Rc::new(EditorProperties::default()),
/// ));
/// registry.add_nodes(&[node]);
///
/// assert!(registry.lookup_node(node).is_some());
/// assert!(registry.lookup_connector(connector).is_some());
/// assert!(registry.lookup_tail(connector).is_some());
/// ```
pub struct SkinRegistry {
    builder: SkinBuilder,
    router: Rc<MoveRouter>,
    nodes: SkinMap<NodeId, dyn NodeSkin>,
    connectors: SkinMap<ConnectorId, dyn ConnectorSkin>,
    connections: SkinMap<ConnectionId, dyn ConnectionSkin>,
    joints: SkinMap<JointId, dyn JointSkin>,
    tails: SkinMap<ConnectorId, dyn TailSkin>,
    /// Connectors skinned for each node, used to cascade removals.
    node_connectors: IndexMap<NodeId, Vec<ConnectorId>>,
}

impl SkinRegistry {
    pub fn new(context: EditorContext) -> Self {
        let router = Rc::new(MoveRouter {
            model: Rc::clone(context.model()),
            layouter: RefCell::new(None),
        });
        let notifier = MoveNotifier::new({
            let router = Rc::clone(&router);
            move |moved| router.route(moved)
        });

        Self {
            builder: SkinBuilder {
                factories: SkinFactories::default(),
                context,
                notifier,
            },
            router,
            nodes: SkinMap::new(SkinKind::Node),
            connectors: SkinMap::new(SkinKind::Connector),
            connections: SkinMap::new(SkinKind::Connection),
            joints: SkinMap::new(SkinKind::Joint),
            tails: SkinMap::new(SkinKind::Tail),
            node_connectors: IndexMap::new(),
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.builder.context
    }

    fn model(&self) -> Rc<dyn GraphModel> {
        Rc::clone(self.builder.context.model())
    }

    /// Sets the collaborator asked to redraw connections when skins move.
    pub fn set_connection_layouter(&mut self, layouter: Option<Rc<dyn ConnectionLayouter>>) {
        *self.router.layouter.borrow_mut() = layouter;
    }

    /// Replaces the editor properties and rebinds every skin to them.
    pub fn set_editor_properties(&mut self, properties: Rc<EditorProperties>) {
        self.builder.context.set_properties(Rc::clone(&properties));
        let context = self.builder.context.clone();

        for skin in self.nodes.values() {
            let mut skin = skin.borrow_mut();
            skin.set_editor_context(context.clone());
            skin.root().set_editor_properties(Some(Rc::clone(&properties)));
        }
        for skin in self.joints.values() {
            let mut skin = skin.borrow_mut();
            skin.set_editor_context(context.clone());
            skin.root().set_editor_properties(Some(Rc::clone(&properties)));
        }
        for skin in self.connectors.values() {
            skin.borrow_mut().set_editor_context(context.clone());
        }
        for skin in self.connections.values() {
            skin.borrow_mut().set_editor_context(context.clone());
        }
        for skin in self.tails.values() {
            skin.borrow_mut().set_editor_context(context.clone());
        }
    }

    pub fn set_node_skin_factory(&mut self, factory: Option<NodeSkinFactory>) {
        self.builder.factories.node = factory;
    }

    pub fn set_connector_skin_factory(&mut self, factory: Option<ConnectorSkinFactory>) {
        self.builder.factories.connector = factory;
    }

    pub fn set_connection_skin_factory(&mut self, factory: Option<ConnectionSkinFactory>) {
        self.builder.factories.connection = factory;
    }

    pub fn set_joint_skin_factory(&mut self, factory: Option<JointSkinFactory>) {
        self.builder.factories.joint = factory;
    }

    pub fn set_tail_skin_factory(&mut self, factory: Option<TailSkinFactory>) {
        self.builder.factories.tail = factory;
    }

    /// Creates skins for `nodes` and for their connectors.
    ///
    /// Nodes that already have a skin keep it; their connectors are
    /// synchronized again.
    pub fn add_nodes(&mut self, nodes: &[NodeId]) {
        if nodes.is_empty() {
            return;
        }
        debug!(count = nodes.len(); "Adding node skins");

        // Factories and initialize hooks may edit the model while we iterate.
        let nodes = nodes.to_vec();
        for node in nodes {
            self.nodes
                .get_or_create(node, |node| self.builder.create_node(node));
            self.add_connectors(node);
        }
    }

    /// Removes the skins of `nodes` and of all their connectors.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Dispose`] when a skin fails to dispose. The
    /// remaining elements are not processed.
    pub fn remove_nodes(&mut self, nodes: &[NodeId]) -> Result<(), RegistryError> {
        if nodes.is_empty() {
            return Ok(());
        }
        debug!(count = nodes.len(); "Removing node skins");

        let nodes = nodes.to_vec();
        for node in nodes {
            self.nodes.remove(node)?;
            let connectors = self.node_connectors_to_remove(node);
            self.node_connectors.shift_remove(&node);
            self.remove_connectors(&connectors)?;
        }
        Ok(())
    }

    /// Rebuilds the connector skins of `nodes` after their connector set changed.
    ///
    /// The old connector and tail skins are disposed and fresh ones created.
    /// Nodes without a skin are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Dispose`] when a skin fails to dispose.
    pub fn update_nodes(&mut self, nodes: &[NodeId]) -> Result<(), RegistryError> {
        if nodes.is_empty() {
            return Ok(());
        }
        debug!(count = nodes.len(); "Updating node skins");

        let nodes = nodes.to_vec();
        for node in nodes {
            if !self.nodes.contains(node) {
                trace!(node:%; "No node skin to update");
                continue;
            }
            let connectors = self.node_connectors_to_remove(node);
            self.remove_connectors(&connectors)?;
            self.add_connectors(node);
        }
        Ok(())
    }

    /// Removes the connector and tail skins of `connectors`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Dispose`] when a skin fails to dispose.
    pub fn remove_connectors(&mut self, connectors: &[ConnectorId]) -> Result<(), RegistryError> {
        if connectors.is_empty() {
            return Ok(());
        }
        trace!(count = connectors.len(); "Removing connector skins");

        let connectors = connectors.to_vec();
        for connector in connectors {
            self.connectors.remove(connector)?;
            self.tails.remove(connector)?;
        }
        Ok(())
    }

    /// Creates skins for `connections` and for their joints.
    pub fn add_connections(&mut self, connections: &[ConnectionId]) {
        if connections.is_empty() {
            return;
        }
        debug!(count = connections.len(); "Adding connection skins");

        let connections = connections.to_vec();
        for connection in connections {
            let skin = self
                .connections
                .get_or_create(connection, |connection| {
                    self.builder.create_connection(connection)
                });

            for joint in self.model().joints(connection) {
                self.joints
                    .get_or_create(joint, |joint| self.builder.create_joint(joint));
            }

            // Factories may have added joints while the first pass ran.
            let joint_skins: Vec<JointSkinRef> = self
                .model()
                .joints(connection)
                .into_iter()
                .map(|joint| {
                    self.joints
                        .get_or_create(joint, |joint| self.builder.create_joint(joint))
                })
                .collect();
            skin.borrow_mut().set_joint_skins(joint_skins);
        }
    }

    /// Removes the skins of `connections`.
    ///
    /// Joint skins are left alone; remove them with [`Self::remove_joints`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Dispose`] when a skin fails to dispose.
    pub fn remove_connections(
        &mut self,
        connections: &[ConnectionId],
    ) -> Result<(), RegistryError> {
        if connections.is_empty() {
            return Ok(());
        }
        debug!(count = connections.len(); "Removing connection skins");

        let connections = connections.to_vec();
        for connection in connections {
            self.connections.remove(connection)?;
        }
        Ok(())
    }

    /// Creates skins for `joints`, then hands `connection`'s skin the skins of
    /// its current joints, in model order.
    ///
    /// With an empty `joints` slice this only resynchronizes the joint list,
    /// for example after the joints were reordered.
    pub fn add_joints(&mut self, connection: ConnectionId, joints: &[JointId]) {
        trace!(connection:%, count = joints.len(); "Adding joint skins");

        let joints = joints.to_vec();
        for joint in joints {
            self.joints
                .get_or_create(joint, |joint| self.builder.create_joint(joint));
        }

        let Some(skin) = self.connections.get(connection) else {
            trace!(connection:%; "No connection skin to resync");
            return;
        };
        let joint_skins: Vec<JointSkinRef> = self
            .model()
            .joints(connection)
            .into_iter()
            .filter_map(|joint| self.joints.get(joint))
            .collect();
        skin.borrow_mut().set_joint_skins(joint_skins);
    }

    /// Removes the skins of `joints`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Dispose`] when a skin fails to dispose.
    pub fn remove_joints(&mut self, joints: &[JointId]) -> Result<(), RegistryError> {
        if joints.is_empty() {
            return Ok(());
        }
        debug!(count = joints.len(); "Removing joint skins");

        let joints = joints.to_vec();
        for joint in joints {
            self.joints.remove(joint)?;
        }
        Ok(())
    }

    /// Initializes every node and joint skin from the model.
    pub fn initialize_all(&self) {
        debug!(
            nodes = self.nodes.len(),
            joints = self.joints.len();
            "Initializing all skins"
        );
        for skin in self.nodes.values() {
            skin.borrow_mut().initialize();
        }
        for skin in self.joints.values() {
            skin.borrow_mut().initialize();
        }
    }

    /// Removes and disposes every skin.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Dispose`] when a skin fails to dispose.
    pub fn remove_all(&mut self) -> Result<(), RegistryError> {
        debug!("Removing all skins");
        self.connections.clear()?;
        self.joints.clear()?;
        self.nodes.clear()?;
        self.connectors.clear()?;
        self.tails.clear()?;
        self.node_connectors.clear();
        Ok(())
    }

    pub fn lookup_node(&self, node: NodeId) -> Option<NodeSkinRef> {
        self.nodes.get(node)
    }

    pub fn lookup_connector(&self, connector: ConnectorId) -> Option<ConnectorSkinRef> {
        self.connectors.get(connector)
    }

    pub fn lookup_connection(&self, connection: ConnectionId) -> Option<ConnectionSkinRef> {
        self.connections.get(connection)
    }

    pub fn lookup_joint(&self, joint: JointId) -> Option<JointSkinRef> {
        self.joints.get(joint)
    }

    pub fn lookup_tail(&self, connector: ConnectorId) -> Option<TailSkinRef> {
        self.tails.get(connector)
    }

    /// Nodes that currently have a skin, in insertion order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.nodes.keys().collect()
    }

    /// Connectors that currently have a skin, in insertion order.
    pub fn connectors(&self) -> Vec<ConnectorId> {
        self.connectors.keys().collect()
    }

    /// Connections that currently have a skin, in insertion order.
    pub fn connections(&self) -> Vec<ConnectionId> {
        self.connections.keys().collect()
    }

    /// Joints that currently have a skin, in insertion order.
    pub fn joints(&self) -> Vec<JointId> {
        self.joints.keys().collect()
    }

    /// Connectors that currently have a tail skin, in insertion order.
    pub fn tails(&self) -> Vec<ConnectorId> {
        self.tails.keys().collect()
    }

    /// Connectors whose skins belong to `node`: the ones skinned for it,
    /// followed by any the model lists that were not skinned yet.
    pub fn node_connectors(&self, node: NodeId) -> Vec<ConnectorId> {
        self.node_connectors_to_remove(node)
    }

    fn node_connectors_to_remove(&self, node: NodeId) -> Vec<ConnectorId> {
        let mut connectors: IndexSet<ConnectorId> = self
            .node_connectors
            .get(&node)
            .map(|connectors| connectors.iter().copied().collect())
            .unwrap_or_default();
        connectors.extend(self.model().connectors(node));
        connectors.into_iter().collect()
    }

    /// Creates connector and tail skins for `node`'s current connectors and
    /// hands the connector skins to the node skin.
    fn add_connectors(&mut self, node: NodeId) {
        let connectors = self.model().connectors(node);
        trace!(node:%, count = connectors.len(); "Synchronizing connector skins");

        let mut connector_skins = Vec::with_capacity(connectors.len());
        for &connector in &connectors {
            connector_skins.push(self.connectors.get_or_create(connector, |connector| {
                self.builder.create_connector(connector)
            }));
            self.tails
                .get_or_create(connector, |connector| self.builder.create_tail(connector));
        }
        self.node_connectors.insert(node, connectors);

        if let Some(skin) = self.nodes.get(node) {
            skin.borrow_mut().set_connector_skins(connector_skins);
        }
    }
}

impl fmt::Debug for SkinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinRegistry")
            .field("nodes", &self.nodes.len())
            .field("connectors", &self.connectors.len())
            .field("connections", &self.connections.len())
            .field("joints", &self.joints.len())
            .field("tails", &self.tails.len())
            .finish()
    }
}
