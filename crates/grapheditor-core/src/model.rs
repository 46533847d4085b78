//! Graph model elements and the navigation contract the skinning layer consumes.
//!
//! The editor model itself lives outside this workspace. The skin registry only
//! needs stable element identities and a way to walk a few relationships, which
//! is what [`GraphModel`] describes:
//!
//! - node → its connectors, in order
//! - connector → the connections attached to it
//! - connection → its joints, in order
//! - joint → its owning connection
//!
//! [`Graph`] is a small in-memory implementation used by tests and by the
//! snapshot CLI.

use std::{cell::RefCell, fmt};

use indexmap::IndexMap;
use log::trace;

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

macro_rules! element_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Id);

        impl $name {
            /// Creates an identifier from an element name.
            pub fn new(name: &str) -> Self {
                Self(Id::new(name))
            }

            /// Returns the underlying interned identifier.
            pub fn id(self) -> Id {
                self.0
            }
        }

        impl From<Id> for $name {
            fn from(id: Id) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

element_id!(
    /// Identity of a graph node.
    NodeId
);
element_id!(
    /// Identity of a connector. Every connector belongs to exactly one node.
    ConnectorId
);
element_id!(
    /// Identity of a connection between two connectors.
    ConnectionId
);
element_id!(
    /// Identity of a joint, a bend point on a connection's path.
    JointId
);

/// Which side of its node a connector sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Incoming connector, placed on the left edge.
    #[default]
    Input,
    /// Outgoing connector, placed on the right edge.
    Output,
}

/// Read access to the graph being edited.
///
/// All methods return owned snapshots. Callers are free to mutate the model
/// while holding a returned list, which is what lets the registry invoke skin
/// factories that edit the model as a side effect.
///
/// Unknown elements yield empty lists or `None`; they are never an error.
pub trait GraphModel {
    /// Connectors of `node`, in model order.
    fn connectors(&self, node: NodeId) -> Vec<ConnectorId>;

    /// Connections attached to `connector`.
    fn connections(&self, connector: ConnectorId) -> Vec<ConnectionId>;

    /// Joints of `connection`, in path order.
    fn joints(&self, connection: ConnectionId) -> Vec<JointId>;

    /// The connection owning `joint`.
    fn joint_connection(&self, joint: JointId) -> Option<ConnectionId>;

    /// Layout bounds stored for `node`.
    fn node_bounds(&self, node: NodeId) -> Option<Bounds>;

    /// Position stored for `joint`.
    fn joint_position(&self, joint: JointId) -> Option<Point>;

    /// Which edge of the node `connector` belongs on.
    fn connector_kind(&self, connector: ConnectorId) -> ConnectorKind;

    /// Every node of the model, in model order. Used for full reloads.
    fn nodes(&self) -> Vec<NodeId>;

    /// Every connection of the model, in model order. Used for full reloads.
    fn all_connections(&self) -> Vec<ConnectionId>;
}

#[derive(Debug)]
struct NodeEntry {
    bounds: Bounds,
    connectors: Vec<ConnectorId>,
}

#[derive(Debug)]
struct ConnectorEntry {
    node: NodeId,
    kind: ConnectorKind,
    connections: Vec<ConnectionId>,
}

#[derive(Debug)]
struct ConnectionEntry {
    source: ConnectorId,
    target: ConnectorId,
    joints: Vec<JointId>,
}

#[derive(Debug)]
struct JointEntry {
    connection: ConnectionId,
    position: Point,
}

#[derive(Debug, Default)]
struct GraphData {
    nodes: IndexMap<NodeId, NodeEntry>,
    connectors: IndexMap<ConnectorId, ConnectorEntry>,
    connections: IndexMap<ConnectionId, ConnectionEntry>,
    joints: IndexMap<JointId, JointEntry>,
}

/// In-memory graph model.
///
/// Uses interior mutability so it can be shared through an `Rc` between the
/// code that edits it and the skins that read from it. Like the rest of the
/// editor it is meant for a single UI thread.
///
/// # Examples
///
/// ```
/// use grapheditor_core::{
///     geometry::{Point, Size},
///     model::{ConnectorKind, Graph, GraphModel, NodeId},
/// };
///
/// let graph = Graph::new();
/// let a = graph.add_node("a", Point::new(0.0, 0.0), Size::new(100.0, 60.0));
/// let out = graph.add_connector(a, "out", ConnectorKind::Output);
///
/// assert_eq!(graph.connectors(a), vec![out]);
/// ```
#[derive(Debug, Default)]
pub struct Graph {
    data: RefCell<GraphData>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at `position` with the given size.
    pub fn add_node(&self, name: &str, position: Point, size: Size) -> NodeId {
        let node = NodeId::new(name);
        self.data.borrow_mut().nodes.insert(
            node,
            NodeEntry {
                bounds: Bounds::new_from_top_left(position, size),
                connectors: Vec::new(),
            },
        );
        trace!(node:%; "Model node added");
        node
    }

    /// Adds a connector to `node`. The connector id is nested under the node id.
    pub fn add_connector(&self, node: NodeId, name: &str, kind: ConnectorKind) -> ConnectorId {
        let connector = ConnectorId::from(node.id().create_nested(Id::new(name)));
        let mut data = self.data.borrow_mut();
        if let Some(entry) = data.nodes.get_mut(&node) {
            entry.connectors.push(connector);
        }
        data.connectors.insert(
            connector,
            ConnectorEntry {
                node,
                kind,
                connections: Vec::new(),
            },
        );
        connector
    }

    /// Connects `source` to `target`, routing through joints at `points`.
    ///
    /// Joint ids are nested under the connection id and numbered in path order.
    pub fn connect(
        &self,
        name: &str,
        source: ConnectorId,
        target: ConnectorId,
        points: &[Point],
    ) -> ConnectionId {
        let connection = ConnectionId::new(name);
        let mut data = self.data.borrow_mut();

        let mut joints = Vec::with_capacity(points.len());
        for (idx, position) in points.iter().enumerate() {
            let joint = JointId::from(connection.id().create_nested(Id::from_anonymous(idx)));
            data.joints.insert(
                joint,
                JointEntry {
                    connection,
                    position: *position,
                },
            );
            joints.push(joint);
        }

        for connector in [source, target] {
            if let Some(entry) = data.connectors.get_mut(&connector) {
                entry.connections.push(connection);
            }
        }
        data.connections.insert(
            connection,
            ConnectionEntry {
                source,
                target,
                joints,
            },
        );
        connection
    }

    /// Inserts a new joint into `connection` at `index` (clamped to the end).
    pub fn insert_joint(
        &self,
        connection: ConnectionId,
        name: &str,
        index: usize,
        position: Point,
    ) -> JointId {
        let joint = JointId::from(connection.id().create_nested(Id::new(name)));
        let mut data = self.data.borrow_mut();
        if let Some(entry) = data.connections.get_mut(&connection) {
            let index = index.min(entry.joints.len());
            entry.joints.insert(index, joint);
        }
        data.joints.insert(
            joint,
            JointEntry {
                connection,
                position,
            },
        );
        joint
    }

    /// Removes `joint` from the model and from its connection's joint list.
    pub fn remove_joint(&self, joint: JointId) {
        let mut data = self.data.borrow_mut();
        let Some(entry) = data.joints.shift_remove(&joint) else {
            return;
        };
        if let Some(connection) = data.connections.get_mut(&entry.connection) {
            connection.joints.retain(|j| *j != joint);
        }
    }

    /// Reverses the joint order of `connection`.
    pub fn reverse_joints(&self, connection: ConnectionId) {
        if let Some(entry) = self.data.borrow_mut().connections.get_mut(&connection) {
            entry.joints.reverse();
        }
    }

    /// Removes `connection` and its joints from the model.
    pub fn remove_connection(&self, connection: ConnectionId) {
        let mut data = self.data.borrow_mut();
        let Some(entry) = data.connections.shift_remove(&connection) else {
            return;
        };
        for joint in &entry.joints {
            data.joints.shift_remove(joint);
        }
        for connector in [entry.source, entry.target] {
            if let Some(connector) = data.connectors.get_mut(&connector) {
                connector.connections.retain(|c| *c != connection);
            }
        }
    }

    /// Removes every connector of `node`, returning the removed ids.
    ///
    /// Connections attached to those connectors are left in place; the caller
    /// decides whether to remove them.
    pub fn clear_connectors(&self, node: NodeId) -> Vec<ConnectorId> {
        let mut data = self.data.borrow_mut();
        let removed = data
            .nodes
            .get_mut(&node)
            .map(|entry| std::mem::take(&mut entry.connectors))
            .unwrap_or_default();
        for connector in &removed {
            data.connectors.shift_remove(connector);
        }
        removed
    }

    /// Removes `node` and its connectors, returning the removed connectors.
    pub fn remove_node(&self, node: NodeId) -> Vec<ConnectorId> {
        let removed = self.clear_connectors(node);
        self.data.borrow_mut().nodes.shift_remove(&node);
        removed
    }

    /// Moves `node` so its top-left corner sits at `position`.
    pub fn set_node_position(&self, node: NodeId, position: Point) {
        if let Some(entry) = self.data.borrow_mut().nodes.get_mut(&node) {
            entry.bounds = Bounds::new_from_top_left(position, entry.bounds.to_size());
        }
    }

    /// The node owning `connector`.
    pub fn connector_node(&self, connector: ConnectorId) -> Option<NodeId> {
        self.data
            .borrow()
            .connectors
            .get(&connector)
            .map(|entry| entry.node)
    }
}

impl GraphModel for Graph {
    fn connectors(&self, node: NodeId) -> Vec<ConnectorId> {
        self.data
            .borrow()
            .nodes
            .get(&node)
            .map(|entry| entry.connectors.clone())
            .unwrap_or_default()
    }

    fn connections(&self, connector: ConnectorId) -> Vec<ConnectionId> {
        self.data
            .borrow()
            .connectors
            .get(&connector)
            .map(|entry| entry.connections.clone())
            .unwrap_or_default()
    }

    fn joints(&self, connection: ConnectionId) -> Vec<JointId> {
        self.data
            .borrow()
            .connections
            .get(&connection)
            .map(|entry| entry.joints.clone())
            .unwrap_or_default()
    }

    fn joint_connection(&self, joint: JointId) -> Option<ConnectionId> {
        self.data
            .borrow()
            .joints
            .get(&joint)
            .map(|entry| entry.connection)
    }

    fn node_bounds(&self, node: NodeId) -> Option<Bounds> {
        self.data.borrow().nodes.get(&node).map(|entry| entry.bounds)
    }

    fn joint_position(&self, joint: JointId) -> Option<Point> {
        self.data
            .borrow()
            .joints
            .get(&joint)
            .map(|entry| entry.position)
    }

    fn connector_kind(&self, connector: ConnectorId) -> ConnectorKind {
        self.data
            .borrow()
            .connectors
            .get(&connector)
            .map(|entry| entry.kind)
            .unwrap_or_default()
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.data.borrow().nodes.keys().copied().collect()
    }

    fn all_connections(&self) -> Vec<ConnectionId> {
        self.data.borrow().connections.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> (Graph, ConnectorId, ConnectorId, ConnectionId) {
        let graph = Graph::new();
        let a = graph.add_node("a", Point::new(0.0, 0.0), Size::new(100.0, 50.0));
        let b = graph.add_node("b", Point::new(300.0, 0.0), Size::new(100.0, 50.0));
        let out = graph.add_connector(a, "out", ConnectorKind::Output);
        let input = graph.add_connector(b, "in", ConnectorKind::Input);
        let conn = graph.connect(
            "a-b",
            out,
            input,
            &[Point::new(150.0, 25.0), Point::new(250.0, 25.0)],
        );
        (graph, out, input, conn)
    }

    #[test]
    fn test_ids_display_their_names() {
        assert_eq!(NodeId::new("n1").to_string(), "n1");
        assert_eq!(JointId::new("j").to_string(), "j");
    }

    #[test]
    fn test_connector_ids_are_nested_under_node() {
        let (graph, out, _, _) = two_node_graph();
        assert_eq!(out.to_string(), "a::out");
        assert_eq!(graph.connector_node(out), Some(NodeId::new("a")));
        assert_eq!(graph.connector_kind(out), ConnectorKind::Output);
    }

    #[test]
    fn test_connect_registers_relationships() {
        let (graph, out, input, conn) = two_node_graph();

        assert_eq!(graph.connections(out), vec![conn]);
        assert_eq!(graph.connections(input), vec![conn]);

        let joints = graph.joints(conn);
        assert_eq!(joints.len(), 2);
        assert_eq!(joints[0].to_string(), "a-b::__0");
        assert_eq!(graph.joint_connection(joints[1]), Some(conn));
        assert_eq!(graph.joint_position(joints[1]), Some(Point::new(250.0, 25.0)));
    }

    #[test]
    fn test_insert_and_remove_joint() {
        let (graph, _, _, conn) = two_node_graph();
        let mid = graph.insert_joint(conn, "mid", 1, Point::new(200.0, 80.0));

        let joints = graph.joints(conn);
        assert_eq!(joints.len(), 3);
        assert_eq!(joints[1], mid);

        graph.remove_joint(mid);
        assert_eq!(graph.joints(conn).len(), 2);
        assert_eq!(graph.joint_connection(mid), None);
    }

    #[test]
    fn test_reverse_joints() {
        let (graph, _, _, conn) = two_node_graph();
        let mut expected = graph.joints(conn);
        expected.reverse();

        graph.reverse_joints(conn);
        assert_eq!(graph.joints(conn), expected);
    }

    #[test]
    fn test_remove_connection_detaches_connectors() {
        let (graph, out, input, conn) = two_node_graph();
        let joints = graph.joints(conn);

        graph.remove_connection(conn);

        assert!(graph.connections(out).is_empty());
        assert!(graph.connections(input).is_empty());
        assert!(graph.joints(conn).is_empty());
        assert_eq!(graph.joint_connection(joints[0]), None);
        assert!(graph.all_connections().is_empty());
    }

    #[test]
    fn test_remove_node_returns_connectors() {
        let (graph, out, _, _) = two_node_graph();
        let a = NodeId::new("a");

        assert_eq!(graph.remove_node(a), vec![out]);
        assert!(graph.connectors(a).is_empty());
        assert_eq!(graph.node_bounds(a), None);
        assert_eq!(graph.nodes(), vec![NodeId::new("b")]);
    }

    #[test]
    fn test_set_node_position_keeps_size() {
        let (graph, _, _, _) = two_node_graph();
        let a = NodeId::new("a");

        graph.set_node_position(a, Point::new(40.0, 40.0));

        let bounds = graph.node_bounds(a).unwrap();
        assert_eq!(bounds.min_point(), Point::new(40.0, 40.0));
        assert_eq!(bounds.to_size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_unknown_elements_are_empty() {
        let graph = Graph::new();
        assert!(graph.connectors(NodeId::new("ghost")).is_empty());
        assert!(graph.connections(ConnectorId::new("ghost")).is_empty());
        assert_eq!(graph.node_bounds(NodeId::new("ghost")), None);
        assert_eq!(
            graph.connector_kind(ConnectorId::new("ghost")),
            ConnectorKind::Input
        );
    }
}
