//! The connection layout seam.
//!
//! Path routing is not done here. The editor only asks a
//! [`ConnectionLayouter`] to redraw connections when something they depend on
//! moved, and to redraw everything after a surface layout pass.

use grapheditor_core::model::ConnectionId;

/// Recomputes connection paths on request.
pub trait ConnectionLayouter {
    /// Redraws the given connections. The list holds no duplicates.
    fn redraw(&self, connections: &[ConnectionId]);

    /// Redraws every connection.
    fn redraw_all(&self);
}
