//! Retained visual tree.
//!
//! A [`Visual`] is the opaque root handle every skin exposes. Visuals are
//! shared, reference-counted nodes compared by identity: cloning a `Visual`
//! yields another handle to the same node, and two distinct nodes never
//! compare equal even when their content is identical.
//!
//! Layers of the editor surface are visuals too; adding a skin's root to a
//! layer makes it a child of that layer.
//!
//! Positions are relative to the parent and describe the top-left corner.
//! [`Visual::set_position`] updates silently, while [`Visual::relocate`]
//! applies the editor properties (snapping, bounds) and notifies the move
//! listener when the position actually changed.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, SvgNode},
    geometry::{Bounds, Point, Size},
    properties::EditorProperties,
};

/// Callback fired after a visual has been relocated.
pub type MoveListener = Rc<dyn Fn()>;

/// What a visual paints before its children, in its own coordinate space.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisualShape {
    /// Paints nothing; the visual only groups its children.
    #[default]
    Empty,
    /// A rectangle filling the visual's size.
    Rectangle {
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
        corner_radius: f32,
    },
    /// An open polyline through the given points.
    Polyline {
        points: Vec<Point>,
        stroke: StrokeDefinition,
    },
    /// Independent line segments, used for grids.
    Lines {
        segments: Vec<(Point, Point)>,
        stroke: StrokeDefinition,
    },
}

impl VisualShape {
    fn render(&self, size: Size) -> Option<SvgNode> {
        match self {
            Self::Empty => None,
            Self::Rectangle {
                fill,
                stroke,
                corner_radius,
            } => {
                let mut rect = svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", fill.as_ref().map_or("none".to_string(), Color::to_string));
                if *corner_radius > 0.0 {
                    rect = rect.set("rx", *corner_radius);
                }
                if let Some(stroke) = stroke {
                    rect = apply_stroke!(rect, stroke);
                }
                Some(Box::new(rect))
            }
            Self::Polyline { points, stroke } => {
                if points.len() < 2 {
                    return None;
                }
                let points = points
                    .iter()
                    .map(|p| format!("{},{}", p.x(), p.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let line = svg_element::Polyline::new()
                    .set("points", points)
                    .set("fill", "none");
                Some(Box::new(apply_stroke!(line, stroke)))
            }
            Self::Lines { segments, stroke } => {
                if segments.is_empty() {
                    return None;
                }
                let data = segments
                    .iter()
                    .map(|(a, b)| format!("M{},{} L{},{}", a.x(), a.y(), b.x(), b.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let path = svg_element::Path::new().set("d", data).set("fill", "none");
                Some(Box::new(apply_stroke!(path, stroke)))
            }
        }
    }
}

struct VisualState {
    style_class: String,
    position: Point,
    size: Size,
    shape: VisualShape,
    visible: bool,
    cache: bool,
    children: Vec<Visual>,
    parent: Weak<RefCell<VisualState>>,
    properties: Option<Rc<EditorProperties>>,
    on_moved: Option<MoveListener>,
}

/// Shared handle to a node of the visual tree.
#[derive(Clone)]
pub struct Visual {
    inner: Rc<RefCell<VisualState>>,
}

impl Visual {
    /// Creates an empty, visible visual carrying `style_class`.
    pub fn new(style_class: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VisualState {
                style_class: style_class.to_string(),
                position: Point::default(),
                size: Size::default(),
                shape: VisualShape::Empty,
                visible: true,
                cache: false,
                children: Vec::new(),
                parent: Weak::new(),
                properties: None,
                on_moved: None,
            })),
        }
    }

    pub fn style_class(&self) -> String {
        self.inner.borrow().style_class.clone()
    }

    pub fn position(&self) -> Point {
        self.inner.borrow().position
    }

    pub fn size(&self) -> Size {
        self.inner.borrow().size
    }

    /// Bounds in the parent's coordinate space.
    pub fn bounds(&self) -> Bounds {
        let state = self.inner.borrow();
        Bounds::new_from_top_left(state.position, state.size)
    }

    /// Moves the visual without applying editor properties or notifying.
    pub fn set_position(&self, position: Point) {
        self.inner.borrow_mut().position = position;
    }

    pub fn resize(&self, size: Size) {
        self.inner.borrow_mut().size = size;
    }

    /// Sets position and size in one go, silently.
    pub fn resize_relocate(&self, x: f32, y: f32, width: f32, height: f32) {
        let mut state = self.inner.borrow_mut();
        state.position = Point::new(x, y);
        state.size = Size::new(width, height);
    }

    /// Moves the visual as the result of an interaction.
    ///
    /// The requested position is constrained by the editor properties bound to
    /// this visual, if any. The move listener fires only when the resulting
    /// position differs from the current one. Returns the applied position.
    pub fn relocate(&self, requested: Point) -> Point {
        let (position, listener) = {
            let mut state = self.inner.borrow_mut();
            let container = state.parent.upgrade().map(|parent| parent.borrow().size);
            let position = match &state.properties {
                Some(properties) => properties.constrain(requested, state.size, container),
                None => requested,
            };
            if position == state.position {
                return position;
            }
            state.position = position;
            (position, state.on_moved.clone())
        };

        // The borrow is released so listeners may read this visual.
        if let Some(listener) = listener {
            listener();
        }
        position
    }

    pub fn shape(&self) -> VisualShape {
        self.inner.borrow().shape.clone()
    }

    pub fn set_shape(&self, shape: VisualShape) {
        self.inner.borrow_mut().shape = shape;
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.inner.borrow_mut().visible = visible;
    }

    /// Whether this visual asks the renderer to cache its content.
    pub fn is_cached(&self) -> bool {
        self.inner.borrow().cache
    }

    pub fn set_cache(&self, cache: bool) {
        self.inner.borrow_mut().cache = cache;
    }

    pub fn editor_properties(&self) -> Option<Rc<EditorProperties>> {
        self.inner.borrow().properties.clone()
    }

    pub fn set_editor_properties(&self, properties: Option<Rc<EditorProperties>>) {
        self.inner.borrow_mut().properties = properties;
    }

    /// Installs (or clears) the listener fired by [`Visual::relocate`].
    pub fn set_on_moved(&self, listener: Option<MoveListener>) {
        self.inner.borrow_mut().on_moved = listener;
    }

    /// Appends `child`. Adding the same child twice stores it twice.
    pub fn add_child(&self, child: &Visual) {
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
    }

    /// Removes the first occurrence of `child`, returning whether it was found.
    pub fn remove_child(&self, child: &Visual) -> bool {
        let removed = {
            let mut state = self.inner.borrow_mut();
            match state.children.iter().position(|c| c == child) {
                Some(index) => {
                    state.children.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed && !self.contains_child(child) {
            child.inner.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Replaces all children with `children`, in order.
    pub fn set_children(&self, children: &[Visual]) {
        self.clear_children();
        for child in children {
            self.add_child(child);
        }
    }

    pub fn clear_children(&self) {
        let removed = std::mem::take(&mut self.inner.borrow_mut().children);
        for child in removed {
            child.inner.borrow_mut().parent = Weak::new();
        }
    }

    pub fn children(&self) -> Vec<Visual> {
        self.inner.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn contains_child(&self, child: &Visual) -> bool {
        self.inner.borrow().children.iter().any(|c| c == child)
    }

    /// Returns the parent visual, if this visual is attached to one.
    pub fn parent(&self) -> Option<Visual> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Visual { inner })
    }

    /// Renders this visual and its children to an SVG group.
    ///
    /// Hidden visuals render to `None`.
    pub fn render(&self) -> Option<SvgNode> {
        let state = self.inner.borrow();
        if !state.visible {
            return None;
        }

        let mut group = svg_element::Group::new().set("class", state.style_class.as_str());
        if state.position != Point::default() {
            group = group.set(
                "transform",
                format!(
                    "translate({},{})",
                    state.position.x(),
                    state.position.y()
                ),
            );
        }
        if state.cache {
            group = group.set("data-cache", "true");
        }
        if let Some(shape) = state.shape.render(state.size) {
            group = group.add(shape);
        }
        for child in &state.children {
            if let Some(node) = child.render() {
                group = group.add(node);
            }
        }
        Some(Box::new(group))
    }
}

impl PartialEq for Visual {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Visual {}

impl fmt::Debug for Visual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Visual")
            .field("style_class", &state.style_class)
            .field("position", &state.position)
            .field("size", &state.size)
            .field("visible", &state.visible)
            .field("children", &state.children.len())
            .finish_non_exhaustive()
    }
}
