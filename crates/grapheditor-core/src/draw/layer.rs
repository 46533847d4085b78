//! Fixed z-order layers of the editor surface.
//!
//! The editor surface stacks four layers whose order never changes:
//!
//! ```text
//!   SelectionBox   (front)
//!   Nodes
//!   Connections
//!   Grid           (back)
//! ```
//!
//! [`SurfaceLayer`] names them, and [`LayeredOutput`] collects rendered SVG
//! nodes per layer so that a snapshot of the surface comes out in the right
//! order no matter in which order the layers were visited.
//!
//! # Example
//!
//! ```
//! # use grapheditor_core::draw::{SurfaceLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(SurfaceLayer::Nodes, Box::new(Rectangle::new()));
//! output.add_to_layer(SurfaceLayer::Grid, Box::new(Rectangle::new()));
//!
//! // Grid group first, then nodes.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// The layers of the editor surface, back to front.
///
/// The derived `Ord` follows declaration order, so sorting by layer yields
/// the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceLayer {
    /// Background grid, always farthest back.
    Grid,
    /// Connections, joints and tails.
    Connections,
    /// Nodes, always in front of connections.
    Nodes,
    /// Rubber-band selection rectangle, always frontmost.
    SelectionBox,
}

impl SurfaceLayer {
    /// All layers in paint order.
    pub const ALL: [SurfaceLayer; 4] = [
        Self::Grid,
        Self::Connections,
        Self::Nodes,
        Self::SelectionBox,
    ];

    /// Returns the layer name, also used as its `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Connections => "connection-layer",
            Self::Nodes => "node-layer",
            Self::SelectionBox => "selection-box",
        }
    }
}

/// SVG nodes grouped by surface layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(SurfaceLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`. Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: SurfaceLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element. Groups
    /// are returned back to front.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps per-layer insertion order
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
