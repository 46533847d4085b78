//! Interned identifiers for graph model elements.
//!
//! Every model element (node, connector, connection, joint) is keyed by an
//! [`Id`]. Identifiers are interned, so equality and hashing are a single
//! integer comparison regardless of how long the element name is.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned element identifier.
///
/// # Examples
///
/// ```
/// use grapheditor_core::identifier::Id;
///
/// let node = Id::new("pump");
/// let connector = node.create_nested(Id::new("outlet"));
/// assert_eq!(connector, "pump::outlet");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an identifier for an element that has no user-facing name.
    ///
    /// ```
    /// use grapheditor_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_anonymous(3), Id::from_anonymous(3));
    /// assert_ne!(Id::from_anonymous(3), Id::from_anonymous(4));
    /// ```
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Creates a child identifier scoped under `self` using a `::` separator.
    ///
    /// Connectors and joints are usually named relative to their owning node
    /// or connection this way.
    pub fn create_nested(&self, child_id: Id) -> Self {
        with_interner(|interner| {
            let parent = interner
                .resolve(self.0)
                .expect("Parent ID should exist in interner")
                .to_owned();
            let child = interner
                .resolve(child_id.0)
                .expect("Child ID should exist in interner");
            let nested = format!("{parent}::{child}");
            Self(interner.get_or_intern(nested))
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| {
            let name = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            f.write_str(name)
        })
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
