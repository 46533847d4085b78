//! Error types for graph editor operations.
//!
//! [`GraphEditorError`] is the top-level error returned by
//! [`GraphEditor`](crate::GraphEditor). Failures raised while tearing skins
//! down surface as [`RegistryError`], which names the skin that failed.

use std::io;

use thiserror::Error;

use crate::skin::{DisposeError, SkinKind};

/// The main error type for graph editor operations.
#[derive(Debug, Error)]
pub enum GraphEditorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised by the [`SkinRegistry`](crate::registry::SkinRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A skin's dispose hook failed.
    ///
    /// The skin has already been removed from the registry when this is
    /// returned; the remaining elements of the batch were not processed.
    #[error("Failed to dispose {kind} skin for `{element}`: {source}")]
    Dispose {
        kind: SkinKind,
        element: String,
        #[source]
        source: DisposeError,
    },
}

impl RegistryError {
    pub(crate) fn dispose(kind: SkinKind, element: impl ToString, source: DisposeError) -> Self {
        Self::Dispose {
            kind,
            element: element.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_error_message_names_the_skin() {
        let err = RegistryError::dispose(SkinKind::Joint, "c::__0", DisposeError::new("busy"));
        assert_eq!(
            err.to_string(),
            "Failed to dispose joint skin for `c::__0`: busy"
        );
    }

    #[test]
    fn test_registry_error_converts_into_editor_error() {
        let err: GraphEditorError =
            RegistryError::dispose(SkinKind::Node, "a", DisposeError::new("gone")).into();
        assert!(matches!(err, GraphEditorError::Registry(_)));
        assert!(err.to_string().contains("node skin for `a`"));
    }
}
