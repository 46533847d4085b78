//! Skins: the visual representation of model elements.
//!
//! Every model element that is displayed has exactly one skin. The element
//! kinds and their skin capabilities are:
//!
//! | Element | Skin trait | Extra capability |
//! |---------|------------|------------------|
//! | Node | [`NodeSkin`] | holds its connectors' skins, movable |
//! | Connector | [`ConnectorSkin`] | |
//! | Connection | [`ConnectionSkin`] | holds its joints' skins |
//! | Joint | [`JointSkin`] | movable |
//! | Connector (dragging) | [`TailSkin`] | draws the tail while a connection is dragged |
//!
//! Skins are shared as `Rc<RefCell<dyn ...>>` handles (see the `*SkinRef`
//! aliases). The [`SkinRegistry`](crate::registry::SkinRegistry) owns the
//! canonical handle for each element and drives the lifecycle: context
//! binding, move notifier wiring and initialization on creation, and
//! [`Skin::dispose`] on removal.
//!
//! A default implementation of each trait lives in this module and is used
//! whenever no factory is registered or a factory declines an element.

mod connection;
mod connector;
mod joint;
mod node;
mod tail;

pub use connection::DefaultConnectionSkin;
pub use connector::DefaultConnectorSkin;
pub use joint::DefaultJointSkin;
pub use node::DefaultNodeSkin;
pub use tail::DefaultTailSkin;

use std::{cell::RefCell, fmt, rc::Rc};

use thiserror::Error;

use grapheditor_core::{
    draw::{MoveListener, Visual},
    geometry::Point,
    model::{ConnectionId, ConnectorId, JointId, NodeId},
};

use crate::context::EditorContext;

pub type NodeSkinRef = Rc<RefCell<dyn NodeSkin>>;
pub type ConnectorSkinRef = Rc<RefCell<dyn ConnectorSkin>>;
pub type ConnectionSkinRef = Rc<RefCell<dyn ConnectionSkin>>;
pub type JointSkinRef = Rc<RefCell<dyn JointSkin>>;
pub type TailSkinRef = Rc<RefCell<dyn TailSkin>>;

/// The kind of a skin, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinKind {
    Node,
    Connector,
    Connection,
    Joint,
    Tail,
}

impl fmt::Display for SkinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Node => "node",
            Self::Connector => "connector",
            Self::Connection => "connection",
            Self::Joint => "joint",
            Self::Tail => "tail",
        };
        f.write_str(name)
    }
}

/// Error returned by a skin's dispose hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DisposeError {
    message: String,
}

impl DisposeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Capabilities shared by all skins.
pub trait Skin {
    /// The root visual of this skin. Layers and parent skins attach it as a child.
    fn root(&self) -> &Visual;

    /// Binds the skin to the editor it is displayed in.
    fn set_editor_context(&mut self, context: EditorContext);

    /// Releases whatever the skin holds. Called once, after the registry
    /// dropped its handle to the skin.
    fn dispose(&mut self) -> Result<(), DisposeError>;
}

/// Skin of a node.
pub trait NodeSkin: Skin {
    fn node(&self) -> NodeId;

    /// Pulls position and size from the model. Must not fire move notifications.
    fn initialize(&mut self);

    /// Replaces the skins of this node's connectors, in model order.
    fn set_connector_skins(&mut self, connector_skins: Vec<ConnectorSkinRef>);

    fn connector_skins(&self) -> Vec<ConnectorSkinRef>;

    /// Wires the root visual so that relocating it notifies `notifier`.
    fn set_move_notifier(&mut self, notifier: MoveNotifier) {
        let listener = notifier.listener(MovedSkin::Node(self.node()));
        self.root().set_on_moved(Some(listener));
    }
}

/// Skin of a connector.
pub trait ConnectorSkin: Skin {
    fn connector(&self) -> ConnectorId;
}

/// Skin of a connection.
pub trait ConnectionSkin: Skin {
    fn connection(&self) -> ConnectionId;

    /// Replaces the skins of this connection's joints, in model order.
    fn set_joint_skins(&mut self, joint_skins: Vec<JointSkinRef>);

    fn joint_skins(&self) -> Vec<JointSkinRef>;

    /// Redraws the connection path. Joint skins that were never initialized
    /// are initialized first.
    fn draw(&mut self);
}

/// Skin of a joint.
pub trait JointSkin: Skin {
    fn joint(&self) -> JointId;

    /// Pulls the position from the model. Must not fire move notifications.
    fn initialize(&mut self);

    fn is_initialized(&self) -> bool;

    /// Wires the root visual so that relocating it notifies `notifier`.
    fn set_move_notifier(&mut self, notifier: MoveNotifier) {
        let listener = notifier.listener(MovedSkin::Joint(self.joint()));
        self.root().set_on_moved(Some(listener));
    }
}

/// Skin drawn from a connector while a new connection is being dragged out of it.
pub trait TailSkin: Skin {
    fn connector(&self) -> ConnectorId;

    /// Draws the tail from `start` to `end`, in surface coordinates.
    fn draw(&mut self, start: Point, end: Point);
}

/// Which movable skin was relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovedSkin {
    Node(NodeId),
    Joint(JointId),
}

/// Shared callback receiving move notifications from movable skins.
///
/// # Example
///
/// ```
/// # use std::{cell::Cell, rc::Rc};
/// # use grapheditor::skin::{MoveNotifier, MovedSkin};
/// # use grapheditor_core::model::NodeId;
/// let count = Rc::new(Cell::new(0));
/// let notifier = MoveNotifier::new({
///     let count = Rc::clone(&count);
///     move |_moved| count.set(count.get() + 1)
/// });
///
/// notifier.notify(MovedSkin::Node(NodeId::new("a")));
/// assert_eq!(count.get(), 1);
/// ```
#[derive(Clone)]
pub struct MoveNotifier {
    route: Rc<dyn Fn(MovedSkin)>,
}

impl MoveNotifier {
    pub fn new(route: impl Fn(MovedSkin) + 'static) -> Self {
        Self {
            route: Rc::new(route),
        }
    }

    pub fn notify(&self, moved: MovedSkin) {
        (self.route)(moved);
    }

    /// Returns a visual move listener that reports `moved` to this notifier.
    pub fn listener(&self, moved: MovedSkin) -> MoveListener {
        let notifier = self.clone();
        Rc::new(move || notifier.notify(moved))
    }
}

impl fmt::Debug for MoveNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveNotifier").finish_non_exhaustive()
    }
}
