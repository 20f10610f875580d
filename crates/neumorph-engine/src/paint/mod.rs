//! Paint model shared by the drawable and the shadow variants.
//!
//! Scope:
//! - color representation (straight-alpha sRGB bytes)
//! - state-dependent colors
//! - fill/stroke style and global alpha modulation
//!
//! Geometry types remain in `coords`.

pub mod alpha;
pub mod color;
pub mod state;

pub use alpha::modulate_alpha;
pub use color::Color;
pub use state::{ColorStateList, StateSet};

/// Which parts of the outline get painted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PaintStyle {
    Fill,
    Stroke,
    #[default]
    FillAndStroke,
}

impl PaintStyle {
    #[inline]
    pub fn has_fill(self) -> bool {
        matches!(self, PaintStyle::Fill | PaintStyle::FillAndStroke)
    }

    #[inline]
    pub fn has_stroke(self) -> bool {
        matches!(self, PaintStyle::Stroke | PaintStyle::FillAndStroke)
    }
}

/// Pixel format hint a drawable reports to its host.
///
/// Shadows are always alpha-blended, so translucent is the only answer a
/// shape drawable gives.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Opacity {
    Translucent,
}
