//! Visual building blocks shared by skins and the editor surface.
//!
//! - [`Visual`]: the retained, identity-compared node every skin exposes as its root
//! - [`VisualShape`]: what a visual paints
//! - [`StrokeDefinition`]: line color, width and pattern
//! - [`SurfaceLayer`] and [`LayeredOutput`]: the fixed z-order of the surface

mod layer;
mod stroke;
mod visual;

pub use layer::{LayeredOutput, SurfaceLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use visual::{MoveListener, Visual, VisualShape};
