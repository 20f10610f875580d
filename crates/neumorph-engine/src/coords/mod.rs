//! Coordinate and geometry types shared by the outline, shadow and drawable code.
//!
//! Canonical space:
//! - Device pixels, already resolved by the host
//! - Origin top-left
//! - +X right, +Y down

mod insets;
mod rect;
mod vec2;

pub use insets::Insets;
pub use rect::Rect;
pub use vec2::Vec2;
