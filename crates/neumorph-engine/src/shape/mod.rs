//! Shape geometry.
//!
//! Responsibilities:
//! - corner geometry value type (`ShapeAppearance`)
//! - outline computation shared by paint, clip masks and the host outline query

mod appearance;
mod outline;

pub use appearance::{CornerFamily, ShapeAppearance, ShapeAppearanceBuilder};
pub use outline::{compute_outline, Outline, OutlineShape};
