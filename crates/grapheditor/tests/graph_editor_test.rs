//! Integration tests for the GraphEditor API
//!
//! These tests verify that model changes keep the surface layers in step with
//! the registered skins.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use grapheditor::{
    GraphEditor, ModelChange,
    config::{EditorConfig, SurfaceConfig},
    geometry::{Point, Size},
    layouter::ConnectionLayouter,
    model::{ConnectionId, ConnectorKind, Graph, GraphModel, NodeId},
    properties::EditorProperties,
    skin::{ConnectionSkin, ConnectionSkinRef, JointSkin, Skin},
};

#[derive(Default)]
struct CountingLayouter {
    redraw_all: Cell<usize>,
}

impl ConnectionLayouter for CountingLayouter {
    fn redraw(&self, _connections: &[ConnectionId]) {}

    fn redraw_all(&self) {
        self.redraw_all.set(self.redraw_all.get() + 1);
    }
}

/// Redraws the connection skins it was handed, like a host layouter would.
#[derive(Default)]
struct DrawingLayouter {
    skins: RefCell<Vec<ConnectionSkinRef>>,
    redraws: Cell<usize>,
}

impl ConnectionLayouter for DrawingLayouter {
    fn redraw(&self, connections: &[ConnectionId]) {
        for skin in self.skins.borrow().iter() {
            let connection = skin.borrow().connection();
            if connections.contains(&connection) {
                skin.borrow_mut().draw();
                self.redraws.set(self.redraws.get() + 1);
            }
        }
    }

    fn redraw_all(&self) {
        for skin in self.skins.borrow().iter() {
            skin.borrow_mut().draw();
        }
    }
}

/// A chain `n0 -> n1 -> n2`, each connection with one joint.
fn chain() -> (Rc<Graph>, Vec<NodeId>, Vec<ConnectionId>) {
    let graph = Rc::new(Graph::new());
    let nodes: Vec<NodeId> = (0..3)
        .map(|i| {
            let x = i as f32 * 150.0;
            graph.add_node(&format!("n{i}"), Point::new(x, 40.0), Size::new(80.0, 40.0))
        })
        .collect();
    for &node in &nodes {
        graph.add_connector(node, "in", ConnectorKind::Input);
        graph.add_connector(node, "out", ConnectorKind::Output);
    }

    let connections = nodes
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let out = graph.connectors(pair[0])[1];
            let input = graph.connectors(pair[1])[0];
            let x = i as f32 * 150.0 + 115.0;
            graph.connect(&format!("e{i}"), out, input, &[Point::new(x, 60.0)])
        })
        .collect();
    (graph, nodes, connections)
}

fn editor_for(graph: &Rc<Graph>) -> GraphEditor {
    let model: Rc<dyn GraphModel> = graph.clone();
    GraphEditor::new(EditorConfig::default(), model)
}

#[test]
fn test_editor_api_exists() {
    let graph = Rc::new(Graph::new());
    let editor = editor_for(&graph);
    assert_eq!(editor.surface().size(), Size::new(800.0, 600.0));
    assert!(editor.registry().nodes().is_empty());
}

#[test]
fn test_config_is_applied_to_surface() {
    let graph = Rc::new(Graph::new());
    let model: Rc<dyn GraphModel> = graph.clone();
    let config = EditorConfig::new(
        EditorProperties::default().with_grid_visible(true),
        SurfaceConfig::new(320.0, 240.0, true),
    );

    let editor = GraphEditor::new(config, model);

    assert_eq!(editor.surface().size(), Size::new(320.0, 240.0));
    assert!(editor.surface().node_layer().is_cached());
    assert!(
        editor
            .surface()
            .editor_properties()
            .is_some_and(|properties| properties.grid_visible())
    );
}

#[test]
fn test_apply_mirrors_skins_into_layers() {
    let (graph, nodes, connections) = chain();
    let mut editor = editor_for(&graph);

    editor
        .apply(
            &ModelChange::new()
                .with_added_nodes(nodes.clone())
                .with_added_connections(connections.clone()),
        )
        .expect("Failed to apply change");

    let node_layer = editor.surface().node_layer();
    assert_eq!(node_layer.child_count(), 3);
    for &node in &nodes {
        let skin = editor.registry().lookup_node(node).unwrap();
        assert!(node_layer.contains_child(skin.borrow().root()));
    }
    // Two connections and two joints.
    assert_eq!(editor.surface().connection_layer().child_count(), 4);
}

#[test]
fn test_apply_twice_does_not_duplicate_visuals() {
    let (graph, nodes, connections) = chain();
    let mut editor = editor_for(&graph);
    let change = ModelChange::new()
        .with_added_nodes(nodes)
        .with_added_connections(connections);

    editor.apply(&change).unwrap();
    editor.apply(&change).unwrap();

    assert_eq!(editor.surface().node_layer().child_count(), 3);
    assert_eq!(editor.surface().connection_layer().child_count(), 4);
}

#[test]
fn test_removals_take_visuals_off_the_surface() {
    let (graph, nodes, connections) = chain();
    let mut editor = editor_for(&graph);
    editor
        .apply(
            &ModelChange::new()
                .with_added_nodes(nodes.clone())
                .with_added_connections(connections.clone()),
        )
        .unwrap();

    let joints = graph.joints(connections[0]);
    editor
        .apply(
            &ModelChange::new()
                .with_removed_connections([connections[0]])
                .with_removed_joints(joints.clone())
                .with_removed_nodes([nodes[0]]),
        )
        .unwrap();

    assert!(editor.registry().lookup_node(nodes[0]).is_none());
    assert!(editor.registry().lookup_connection(connections[0]).is_none());
    assert!(editor.registry().lookup_joint(joints[0]).is_none());
    assert_eq!(editor.surface().node_layer().child_count(), 2);
    assert_eq!(editor.surface().connection_layer().child_count(), 2);
}

#[test]
fn test_added_joints_reach_the_surface() {
    let (graph, nodes, connections) = chain();
    let mut editor = editor_for(&graph);
    editor
        .apply(
            &ModelChange::new()
                .with_added_nodes(nodes)
                .with_added_connections(connections.clone()),
        )
        .unwrap();

    let joint = graph.insert_joint(connections[1], "bend", 0, Point::new(260.0, 90.0));
    editor
        .apply(&ModelChange::new().with_added_joints(connections[1], [joint]))
        .unwrap();

    let skin = editor.registry().lookup_joint(joint).unwrap();
    assert!(
        editor
            .surface()
            .connection_layer()
            .contains_child(skin.borrow().root())
    );
    assert_eq!(editor.surface().connection_layer().child_count(), 5);
}

#[test]
fn test_reload_rebuilds_from_model() {
    let (graph, _nodes, connections) = chain();
    let mut editor = editor_for(&graph);

    editor.reload().expect("Failed to reload");
    let first = editor.registry().lookup_connection(connections[0]).unwrap();

    editor.reload().expect("Failed to reload");
    let second = editor.registry().lookup_connection(connections[0]).unwrap();

    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(editor.registry().nodes().len(), 3);
    assert_eq!(editor.surface().node_layer().child_count(), 3);
    assert_eq!(editor.surface().connection_layer().child_count(), 4);

    // Joints are initialized by the bulk load.
    let joint = graph.joints(connections[0])[0];
    let skin = editor.registry().lookup_joint(joint).unwrap();
    assert!(skin.borrow().is_initialized());
}

#[test]
fn test_layout_triggers_full_redraw() {
    let (graph, _nodes, _connections) = chain();
    let mut editor = editor_for(&graph);
    let layouter = Rc::new(CountingLayouter::default());
    editor.set_connection_layouter(Some(layouter.clone() as Rc<dyn ConnectionLayouter>));

    editor.reload().unwrap();
    editor.layout();
    editor.layout();

    assert_eq!(layouter.redraw_all.get(), 2);
    assert_eq!(editor.surface().node_layer().size(), editor.surface().size());
}

#[test]
fn test_render_svg_snapshot() {
    let (graph, _nodes, _connections) = chain();
    let mut editor = editor_for(&graph);
    editor.set_editor_properties(EditorProperties::default().with_grid_visible(true));
    editor.reload().unwrap();
    editor.layout();

    let svg = editor.render_svg();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert_eq!(svg.matches("class=\"default-node\"").count(), 3);
    assert_eq!(svg.matches("class=\"default-joint\"").count(), 2);
    assert!(svg.find("data-layer=\"grid\"") < svg.find("data-layer=\"node-layer\""));
}

#[test]
fn test_moving_uninitialized_joint_redraws_its_connection() {
    let (graph, nodes, connections) = chain();
    let mut editor = editor_for(&graph);
    let layouter = Rc::new(DrawingLayouter::default());
    editor.set_connection_layouter(Some(layouter.clone() as Rc<dyn ConnectionLayouter>));
    editor
        .apply(
            &ModelChange::new()
                .with_added_nodes(nodes)
                .with_added_connections(connections.clone()),
        )
        .unwrap();

    let connection_skin = editor.registry().lookup_connection(connections[0]).unwrap();
    layouter.skins.borrow_mut().push(connection_skin);

    let joint = graph.joints(connections[0])[0];
    let skin = editor.registry().lookup_joint(joint).unwrap();
    assert!(!skin.borrow().is_initialized());

    let position = skin.borrow().root().relocate(Point::new(170.0, 50.0));

    assert_eq!(position, Point::new(170.0, 50.0));
    assert_eq!(layouter.redraws.get(), 1);
    assert_eq!(skin.borrow().root().position(), Point::new(170.0, 50.0));
}
