//! Crystal symmetry: point groups and tensor projection

mod point_group;
mod projector;

pub use point_group::{validate_operators, AxisPermutation, PointGroup};
pub use projector::SymmetryProjector;
