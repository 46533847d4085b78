//! Batches of model edits fed to the editor.

use grapheditor_core::model::{ConnectionId, JointId, NodeId};

/// Elements added, removed or structurally updated by one model edit.
///
/// # Example
///
/// ```
/// # use grapheditor::ModelChange;
/// # use grapheditor_core::model::{ConnectionId, NodeId};
/// let change = ModelChange::new()
///     .with_added_nodes([NodeId::new("a"), NodeId::new("b")])
///     .with_added_connections([ConnectionId::new("a-b")]);
/// assert_eq!(change.added_nodes().len(), 2);
/// assert!(!change.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelChange {
    added_nodes: Vec<NodeId>,
    removed_nodes: Vec<NodeId>,
    updated_nodes: Vec<NodeId>,
    added_connections: Vec<ConnectionId>,
    removed_connections: Vec<ConnectionId>,
    added_joints: Vec<(ConnectionId, Vec<JointId>)>,
    removed_joints: Vec<JointId>,
}

impl ModelChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_added_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.added_nodes.extend(nodes);
        self
    }

    pub fn with_removed_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.removed_nodes.extend(nodes);
        self
    }

    /// Nodes whose connector set changed.
    pub fn with_updated_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.updated_nodes.extend(nodes);
        self
    }

    pub fn with_added_connections(
        mut self,
        connections: impl IntoIterator<Item = ConnectionId>,
    ) -> Self {
        self.added_connections.extend(connections);
        self
    }

    pub fn with_removed_connections(
        mut self,
        connections: impl IntoIterator<Item = ConnectionId>,
    ) -> Self {
        self.removed_connections.extend(connections);
        self
    }

    /// Joints added to `connection`. An empty list still resyncs the
    /// connection's joints, e.g. after a reorder.
    pub fn with_added_joints(
        mut self,
        connection: ConnectionId,
        joints: impl IntoIterator<Item = JointId>,
    ) -> Self {
        self.added_joints
            .push((connection, joints.into_iter().collect()));
        self
    }

    pub fn with_removed_joints(mut self, joints: impl IntoIterator<Item = JointId>) -> Self {
        self.removed_joints.extend(joints);
        self
    }

    pub fn added_nodes(&self) -> &[NodeId] {
        &self.added_nodes
    }

    pub fn removed_nodes(&self) -> &[NodeId] {
        &self.removed_nodes
    }

    pub fn updated_nodes(&self) -> &[NodeId] {
        &self.updated_nodes
    }

    pub fn added_connections(&self) -> &[ConnectionId] {
        &self.added_connections
    }

    pub fn removed_connections(&self) -> &[ConnectionId] {
        &self.removed_connections
    }

    pub fn added_joints(&self) -> &[(ConnectionId, Vec<JointId>)] {
        &self.added_joints
    }

    pub fn removed_joints(&self) -> &[JointId] {
        &self.removed_joints
    }

    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.updated_nodes.is_empty()
            && self.added_connections.is_empty()
            && self.removed_connections.is_empty()
            && self.added_joints.is_empty()
            && self.removed_joints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_change() {
        assert!(ModelChange::new().is_empty());
        assert!(ModelChange::new().with_added_nodes([]).is_empty());
    }

    #[test]
    fn test_resync_only_joint_entry_is_not_empty() {
        let connection = ConnectionId::new("c");
        let change = ModelChange::new().with_added_joints(connection, []);
        assert!(!change.is_empty());
        assert_eq!(change.added_joints(), &[(connection, Vec::new())]);
    }
}
