//! A connection layouter that redraws connection skins in place.

use std::cell::RefCell;

use grapheditor::{
    layouter::ConnectionLayouter,
    model::ConnectionId,
    skin::ConnectionSkinRef,
};

/// Redraws the connection skins it tracks by calling their `draw` hook.
#[derive(Default)]
pub struct SkinLayouter {
    skins: RefCell<Vec<ConnectionSkinRef>>,
}

impl SkinLayouter {
    /// Replaces the tracked connection skins.
    pub fn track(&self, skins: Vec<ConnectionSkinRef>) {
        *self.skins.borrow_mut() = skins;
    }
}

impl ConnectionLayouter for SkinLayouter {
    fn redraw(&self, connections: &[ConnectionId]) {
        for skin in self.skins.borrow().iter() {
            let connection = skin.borrow().connection();
            if connections.contains(&connection) {
                skin.borrow_mut().draw();
            }
        }
    }

    fn redraw_all(&self) {
        for skin in self.skins.borrow().iter() {
            skin.borrow_mut().draw();
        }
    }
}
