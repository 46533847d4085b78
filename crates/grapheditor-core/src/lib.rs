//! Graph Editor Core Types
//!
//! This crate provides the foundational types shared by the graph editor's
//! skinning layer. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Model**: Element identities and the [`model::GraphModel`] navigation contract
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Properties**: Editor-wide grid and bounds settings ([`properties::EditorProperties`])
//! - **Draw**: The retained visual tree and surface layers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod properties;
