//! CLI logic for the graph editor snapshot tool.
//!
//! Builds a sample chain graph, runs it through a [`GraphEditor`] and writes
//! the laid-out surface as SVG.

mod args;
mod config;
mod layouter;

pub use args::Args;
pub use config::ConfigError;
pub use layouter::SkinLayouter;

use std::{fs, rc::Rc};

use log::{debug, info};

use grapheditor::{
    GraphEditor, GraphEditorError,
    geometry::{Point, Size},
    layouter::ConnectionLayouter,
    model::{ConnectorKind, Graph, GraphModel},
};

const NODE_WIDTH: f32 = 120.0;
const NODE_HEIGHT: f32 = 60.0;
const NODE_GAP: f32 = 80.0;
const MARGIN: f32 = 40.0;

/// Builds a chain of `nodes` nodes, each wired to the next through one joint.
pub fn sample_graph(nodes: usize) -> Graph {
    let graph = Graph::new();
    let size = Size::new(NODE_WIDTH, NODE_HEIGHT);
    let step = NODE_WIDTH + NODE_GAP;

    let mut previous = None;
    for i in 0..nodes {
        let position = Point::new(MARGIN + step * i as f32, MARGIN);
        let node = graph.add_node(&format!("node{i}"), position, size);
        let input = graph.add_connector(node, "in", ConnectorKind::Input);
        let output = graph.add_connector(node, "out", ConnectorKind::Output);

        if let Some(source) = previous {
            let bend = Point::new(
                position.x() - NODE_GAP / 2.0,
                MARGIN + NODE_HEIGHT / 2.0,
            );
            graph.connect(&format!("edge{i}"), source, input, &[bend]);
        }
        previous = Some(output);
    }
    graph
}

/// Run the graph editor CLI application
///
/// # Errors
///
/// Returns `GraphEditorError` for:
/// - Configuration loading errors
/// - Skin disposal errors while loading the view
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), GraphEditorError> {
    info!(
        output_path = args.output,
        nodes = args.nodes;
        "Rendering sample graph"
    );

    let config = config::load_config(args.config.as_ref())?;

    let model: Rc<dyn GraphModel> = Rc::new(sample_graph(args.nodes));
    let mut editor = GraphEditor::new(config, model);
    let layouter = Rc::new(SkinLayouter::default());
    editor.set_connection_layouter(Some(layouter.clone() as Rc<dyn ConnectionLayouter>));

    editor.reload()?;
    let registry = editor.registry();
    layouter.track(
        registry
            .connections()
            .into_iter()
            .filter_map(|connection| registry.lookup_connection(connection))
            .collect(),
    );
    editor.layout();
    debug!(size:? = editor.surface().size(); "Surface laid out");

    fs::write(&args.output, editor.render_svg())?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
