//! Volume and surface-area estimation over collision shape primitives.
//!
//! Per-shape formulas live on [`Shape`]; [`GeometryProfile`] sums them over an
//! entity's shape tree and caches the result until the next recalculation.

mod mesh;
mod profile;
mod shape;

// Re-export public types
pub use mesh::TriangleMesh;
pub use profile::{GeometryProfile, ShapeNode};
pub use shape::Shape;
