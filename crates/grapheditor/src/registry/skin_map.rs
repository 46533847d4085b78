//! Identity-keyed storage for one kind of skin.

use std::{cell::RefCell, fmt::Display, hash::Hash, rc::Rc};

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::RegistryError,
    skin::{Skin, SkinKind},
};

/// Maps model elements to their skins, in insertion order.
///
/// At most one skin exists per element. Removing an element drops the map's
/// handle first and then disposes the skin.
pub(crate) struct SkinMap<K, S: ?Sized> {
    kind: SkinKind,
    skins: IndexMap<K, Rc<RefCell<S>>>,
}

impl<K, S> SkinMap<K, S>
where
    K: Copy + Eq + Hash + Display,
    S: Skin + ?Sized,
{
    pub(crate) fn new(kind: SkinKind) -> Self {
        Self {
            kind,
            skins: IndexMap::new(),
        }
    }

    pub(crate) fn get(&self, key: K) -> Option<Rc<RefCell<S>>> {
        self.skins.get(&key).cloned()
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        self.skins.contains_key(&key)
    }

    /// Returns the skin for `key`, creating it with `create` if there is none.
    pub(crate) fn get_or_create(
        &mut self,
        key: K,
        create: impl FnOnce(K) -> Rc<RefCell<S>>,
    ) -> Rc<RefCell<S>> {
        Rc::clone(self.skins.entry(key).or_insert_with(|| create(key)))
    }

    /// Removes and disposes the skin for `key`. Absent keys are a no-op.
    pub(crate) fn remove(&mut self, key: K) -> Result<(), RegistryError> {
        let Some(skin) = self.skins.shift_remove(&key) else {
            return Ok(());
        };
        trace!(kind:% = self.kind, element:% = key; "Disposing skin");
        let result = skin.borrow_mut().dispose();
        result.map_err(|err| RegistryError::dispose(self.kind, key, err))
    }

    /// Removes and disposes every skin, stopping at the first failure.
    pub(crate) fn clear(&mut self) -> Result<(), RegistryError> {
        let keys: Vec<K> = self.keys().collect();
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.skins.keys().copied()
    }

    pub(crate) fn values(&self) -> Vec<Rc<RefCell<S>>> {
        self.skins.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.skins.len()
    }
}

#[cfg(test)]
mod tests {
    use grapheditor_core::model::{ConnectorId, NodeId};

    use super::*;
    use crate::skin::{ConnectorSkin, DefaultConnectorSkin, DefaultNodeSkin, NodeSkin};

    fn node_skin(node: NodeId) -> Rc<RefCell<dyn NodeSkin>> {
        Rc::new(RefCell::new(DefaultNodeSkin::new(node)))
    }

    #[test]
    fn test_get_or_create_creates_once() {
        let mut map: SkinMap<NodeId, dyn NodeSkin> = SkinMap::new(SkinKind::Node);
        let node = NodeId::new("once");

        let first = map.get_or_create(node, node_skin);
        let second = map.get_or_create(node, |_| panic!("must not create twice"));

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(map.len(), 1);
        assert!(map.contains(node));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut map: SkinMap<ConnectorId, dyn ConnectorSkin> = SkinMap::new(SkinKind::Connector);
        assert!(map.remove(ConnectorId::new("missing")).is_ok());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut map: SkinMap<ConnectorId, dyn ConnectorSkin> = SkinMap::new(SkinKind::Connector);
        for name in ["c", "a", "b"] {
            map.get_or_create(ConnectorId::new(name), |connector| {
                Rc::new(RefCell::new(DefaultConnectorSkin::new(connector)))
            });
        }
        let keys: Vec<String> = map.keys().map(|key| key.to_string()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);

        map.clear().unwrap();
        assert_eq!(map.len(), 0);
    }
}
