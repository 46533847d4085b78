//! The layered drawing surface.
//!
//! [`LayeredSurface`] is the rectangular region skins are drawn on. Its
//! children are fixed at construction, back to front:
//!
//! ```text
//!   selection box   (front)
//!   node layer
//!   connection layer
//!   grid            (back)
//! ```
//!
//! Node skins go to the node layer; connection, joint and tail skins go to
//! the connection layer. Adding or removing skins only ever changes the
//! children of those two layers, so the z-order above never changes.

mod grid;
mod selection_box;

use std::{fmt, rc::Rc};

use log::{debug, trace};

use grapheditor_core::{
    draw::{LayeredOutput, SurfaceLayer, Visual},
    geometry::Size,
    properties::EditorProperties,
};

use crate::{
    layouter::ConnectionLayouter,
    skin::{ConnectionSkinRef, JointSkinRef, NodeSkinRef, Skin, TailSkinRef},
};

use grid::Grid;
use selection_box::SelectionBox;

/// Drawing surface holding the grid, the two content layers and the
/// selection box.
///
/// # Example
///
/// ```
/// # use grapheditor::surface::LayeredSurface;
/// let surface = LayeredSurface::new();
/// surface.resize(400.0, 300.0);
/// surface.layout();
///
/// assert_eq!(surface.node_layer().size(), surface.size());
/// assert!(surface.render_svg().contains("data-layer=\"node-layer\""));
/// ```
pub struct LayeredSurface {
    root: Visual,
    grid: Grid,
    connection_layer: Visual,
    node_layer: Visual,
    selection_box: SelectionBox,
    properties: Option<Rc<EditorProperties>>,
    layouter: Option<Rc<dyn ConnectionLayouter>>,
}

impl Default for LayeredSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl LayeredSurface {
    pub fn new() -> Self {
        let root = Visual::new("graph-editor");
        let grid = Grid::new();
        let connection_layer = Visual::new("graph-editor-connection-layer");
        let node_layer = Visual::new("graph-editor-node-layer");
        let selection_box = SelectionBox::new();

        root.add_child(grid.root());
        root.add_child(&connection_layer);
        root.add_child(&node_layer);
        root.add_child(selection_box.root());

        Self {
            root,
            grid,
            connection_layer,
            node_layer,
            selection_box,
            properties: None,
            layouter: None,
        }
    }

    /// The root visual of the surface.
    pub fn root(&self) -> &Visual {
        &self.root
    }

    /// The layer holding node skins.
    pub fn node_layer(&self) -> &Visual {
        &self.node_layer
    }

    /// The layer holding connection, joint and tail skins.
    pub fn connection_layer(&self) -> &Visual {
        &self.connection_layer
    }

    /// Sets the collaborator asked to redraw every connection on layout.
    pub fn set_connection_layouter(&mut self, layouter: Option<Rc<dyn ConnectionLayouter>>) {
        self.layouter = layouter;
    }

    pub fn add_node(&self, skin: &NodeSkinRef) {
        self.node_layer.add_child(skin.borrow().root());
    }

    pub fn add_connection(&self, skin: &ConnectionSkinRef) {
        self.connection_layer.add_child(skin.borrow().root());
    }

    pub fn add_joint(&self, skin: &JointSkinRef) {
        self.connection_layer.add_child(skin.borrow().root());
    }

    pub fn add_tail(&self, skin: &TailSkinRef) {
        self.connection_layer.add_child(skin.borrow().root());
    }

    pub fn remove_node(&self, skin: &NodeSkinRef) {
        self.node_layer.remove_child(skin.borrow().root());
    }

    pub fn remove_connection(&self, skin: &ConnectionSkinRef) {
        self.connection_layer.remove_child(skin.borrow().root());
    }

    pub fn remove_joint(&self, skin: &JointSkinRef) {
        self.connection_layer.remove_child(skin.borrow().root());
    }

    pub fn remove_tail(&self, skin: &TailSkinRef) {
        self.connection_layer.remove_child(skin.borrow().root());
    }

    /// Empties both content layers.
    pub fn clear(&self) {
        debug!(
            nodes = self.node_layer.child_count(),
            connections = self.connection_layer.child_count();
            "Clearing surface layers"
        );
        self.node_layer.clear_children();
        self.connection_layer.clear_children();
    }

    pub fn editor_properties(&self) -> Option<Rc<EditorProperties>> {
        self.properties.clone()
    }

    /// Stores the editor properties and forwards them to the grid.
    pub fn set_editor_properties(&mut self, properties: Option<Rc<EditorProperties>>) {
        self.grid.set_properties(properties.clone());
        self.properties = properties;
    }

    /// Shows the selection box at the given rectangle.
    pub fn draw_selection_box(&self, x: f32, y: f32, width: f32, height: f32) {
        self.selection_box.draw(x, y, width, height);
    }

    pub fn hide_selection_box(&self) {
        self.selection_box.hide();
    }

    /// Asks the renderer to cache both content layers and the grid.
    ///
    /// Helps while the content is static and costs memory and redraw time
    /// while it changes. Cached content may look blurry under scaling or on
    /// high-density displays, so this is off by default.
    pub fn set_content_cache(&self, cache: bool) {
        self.node_layer.set_cache(cache);
        self.connection_layer.set_cache(cache);
        self.grid.root().set_cache(cache);
    }

    pub fn size(&self) -> Size {
        self.root.size()
    }

    /// Resizes the surface, capped by the maximum size of the editor properties.
    ///
    /// Takes effect on the next [`Self::layout`].
    pub fn resize(&self, width: f32, height: f32) {
        let max = self
            .properties
            .as_ref()
            .map(|properties| properties.max_size());
        let (width, height) = match max {
            Some(max) => (width.min(max.width()), height.min(max.height())),
            None => (width, height),
        };
        self.root.resize(Size::new(width.max(0.0), height.max(0.0)));
    }

    /// Lays the surface out.
    ///
    /// Both layers take the surface bounds first, since connection paths are
    /// computed in their coordinate space; then every connection is redrawn;
    /// then the grid is resized.
    pub fn layout(&self) {
        let size = self.size();
        trace!(width = size.width(), height = size.height(); "Laying out surface");

        self.node_layer
            .resize_relocate(0.0, 0.0, size.width(), size.height());
        self.connection_layer
            .resize_relocate(0.0, 0.0, size.width(), size.height());

        match &self.layouter {
            Some(layouter) => layouter.redraw_all(),
            None => trace!("No connection layouter, skipping redraw"),
        }

        self.grid
            .resize_relocate(0.0, 0.0, size.width(), size.height());
    }

    /// Renders the surface to an SVG document.
    ///
    /// Every visible part becomes a `<g data-layer="...">` group, back to front.
    pub fn render_svg(&self) -> String {
        let mut output = LayeredOutput::new();
        let parts = [
            (SurfaceLayer::Grid, self.grid.root()),
            (SurfaceLayer::Connections, &self.connection_layer),
            (SurfaceLayer::Nodes, &self.node_layer),
            (SurfaceLayer::SelectionBox, self.selection_box.root()),
        ];
        for (layer, visual) in parts {
            if let Some(node) = visual.render() {
                output.add_to_layer(layer, node);
            }
        }

        let size = self.size();
        let mut document = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());
        for group in output.render() {
            document = document.add(group);
        }
        document.to_string()
    }
}

impl fmt::Debug for LayeredSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredSurface")
            .field("size", &self.size())
            .field("nodes", &self.node_layer.child_count())
            .field("connections", &self.connection_layer.child_count())
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use grapheditor_core::model::{ConnectionId, NodeId};

    use super::*;
    use crate::skin::{DefaultConnectionSkin, DefaultNodeSkin};

    struct RecordingLayouter {
        redraws: Cell<usize>,
        node_layer_size: RefCell<Vec<Size>>,
        layer: Visual,
    }

    impl ConnectionLayouter for RecordingLayouter {
        fn redraw(&self, _connections: &[ConnectionId]) {}

        fn redraw_all(&self) {
            self.redraws.set(self.redraws.get() + 1);
            self.node_layer_size.borrow_mut().push(self.layer.size());
        }
    }

    fn node_skin(name: &str) -> NodeSkinRef {
        Rc::new(RefCell::new(DefaultNodeSkin::new(NodeId::new(name))))
    }

    #[test]
    fn test_z_order_is_fixed() {
        let surface = LayeredSurface::new();
        let children = surface.root().children();
        assert_eq!(children.len(), 4);
        assert_eq!(children[1], *surface.connection_layer());
        assert_eq!(children[2], *surface.node_layer());

        surface.add_node(&node_skin("z"));
        assert_eq!(surface.root().children(), children);
    }

    #[test]
    fn test_skins_go_to_their_layer() {
        let surface = LayeredSurface::new();
        let node = node_skin("n");
        let connection: ConnectionSkinRef =
            Rc::new(RefCell::new(DefaultConnectionSkin::new(ConnectionId::new("c"))));

        surface.add_node(&node);
        surface.add_connection(&connection);

        assert!(surface.node_layer().contains_child(node.borrow().root()));
        assert!(
            surface
                .connection_layer()
                .contains_child(connection.borrow().root())
        );
        assert_eq!(surface.node_layer().child_count(), 1);
        assert_eq!(surface.connection_layer().child_count(), 1);

        surface.remove_node(&node);
        surface.remove_connection(&connection);
        assert_eq!(surface.node_layer().child_count(), 0);
        assert_eq!(surface.connection_layer().child_count(), 0);
    }

    #[test]
    fn test_duplicate_adds_are_kept() {
        let surface = LayeredSurface::new();
        let node = node_skin("twice");
        surface.add_node(&node);
        surface.add_node(&node);
        assert_eq!(surface.node_layer().child_count(), 2);
    }

    #[test]
    fn test_clear_then_add_leaves_one_root() {
        let surface = LayeredSurface::new();
        for name in ["a", "b", "c"] {
            surface.add_node(&node_skin(name));
        }

        surface.clear();
        let node = node_skin("d");
        surface.add_node(&node);

        assert_eq!(surface.node_layer().children(), vec![node.borrow().root().clone()]);
        assert_eq!(surface.connection_layer().child_count(), 0);
    }

    #[test]
    fn test_layout_resizes_layers_before_redraw() {
        let mut surface = LayeredSurface::new();
        let layouter = Rc::new(RecordingLayouter {
            redraws: Cell::new(0),
            node_layer_size: RefCell::new(Vec::new()),
            layer: surface.node_layer().clone(),
        });
        surface.set_connection_layouter(Some(layouter.clone() as Rc<dyn ConnectionLayouter>));
        surface.resize(320.0, 200.0);

        surface.layout();

        assert_eq!(layouter.redraws.get(), 1);
        assert_eq!(
            *layouter.node_layer_size.borrow(),
            vec![Size::new(320.0, 200.0)]
        );
        assert_eq!(surface.connection_layer().size(), Size::new(320.0, 200.0));
    }

    #[test]
    fn test_layout_without_layouter() {
        let surface = LayeredSurface::new();
        surface.resize(10.0, 10.0);
        surface.layout();
        assert_eq!(surface.node_layer().size(), Size::new(10.0, 10.0));
    }

    #[test]
    fn test_resize_is_capped_by_properties() {
        let mut surface = LayeredSurface::new();
        surface.set_editor_properties(Some(Rc::new(EditorProperties::default())));
        surface.resize(2_000_000.0, 50.0);
        assert_eq!(surface.size().width(), 1_000_000.0);
        assert_eq!(surface.size().height(), 50.0);
    }

    #[test]
    fn test_content_cache_toggles_layers() {
        let surface = LayeredSurface::new();
        assert!(!surface.node_layer().is_cached());

        surface.set_content_cache(true);
        assert!(surface.node_layer().is_cached());
        assert!(surface.connection_layer().is_cached());

        surface.set_content_cache(false);
        assert!(!surface.connection_layer().is_cached());
    }

    #[test]
    fn test_editor_properties_round_trip() {
        let mut surface = LayeredSurface::new();
        assert!(surface.editor_properties().is_none());

        let properties = Rc::new(EditorProperties::default().with_grid_visible(true));
        surface.set_editor_properties(Some(Rc::clone(&properties)));
        assert!(Rc::ptr_eq(
            &surface.editor_properties().unwrap(),
            &properties
        ));
    }

    #[test]
    fn test_render_svg_orders_layers() {
        let mut surface = LayeredSurface::new();
        surface.set_editor_properties(Some(Rc::new(
            EditorProperties::default().with_grid_visible(true),
        )));
        surface.resize(100.0, 100.0);
        surface.layout();
        surface.draw_selection_box(1.0, 1.0, 5.0, 5.0);

        let svg = surface.render_svg();
        let grid = svg.find("data-layer=\"grid\"").unwrap();
        let connections = svg.find("data-layer=\"connection-layer\"").unwrap();
        let nodes = svg.find("data-layer=\"node-layer\"").unwrap();
        let selection = svg.find("data-layer=\"selection-box\"").unwrap();
        assert!(grid < connections && connections < nodes && nodes < selection);
    }

    #[test]
    fn test_hidden_selection_box_is_not_rendered() {
        let surface = LayeredSurface::new();
        surface.draw_selection_box(0.0, 0.0, 5.0, 5.0);
        surface.hide_selection_box();
        assert!(!surface.render_svg().contains("data-layer=\"selection-box\""));
    }
}
