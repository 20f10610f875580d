//! Shadow variants.
//!
//! Each variant turns the shared render state plus the drawable bounds into
//! one or two blurred bitmaps and composites them against the outline:
//! - `Flat`: raised surface, light and dark shadows outside the outline
//! - `Pressed`: dent, dark and light bands inside the outline
//! - `Basin`: bowl, both bands blended into one softer inner layer
//!
//! Extending: add a variant to `ShapeVariant` and `Shadow`; every `match` over
//! them is exhaustive, so the compiler lists the places to update.

mod basin;
mod flat;
mod layer;
mod pressed;

use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::coords::{Insets, Rect, Vec2};
use crate::drawable::{RenderState, SharedState};
use crate::paint::Color;
use crate::shape::{Outline, ShapeAppearance};

pub use basin::BasinShape;
pub use flat::FlatShape;
pub use pressed::PressedShape;

/// Shadow rendering strategy.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ShapeVariant {
    #[default]
    Flat,
    Pressed,
    Basin,
}

impl TryFrom<i32> for ShapeVariant {
    type Error = anyhow::Error;

    /// Raw host values: 0 = flat, 1 = pressed, 2 = basin.
    fn try_from(raw: i32) -> anyhow::Result<Self> {
        match raw {
            0 => Ok(ShapeVariant::Flat),
            1 => Ok(ShapeVariant::Pressed),
            2 => Ok(ShapeVariant::Basin),
            other => anyhow::bail!("ShapeVariant({other}) is invalid"),
        }
    }
}

/// Which shadow color a bitmap was rendered with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShadowTone {
    Light,
    Dark,
    /// Light and dark composited into one bitmap.
    Blended,
}

/// Prepared shadow raster.
///
/// `offset` is where the bitmap's top-left corner goes, relative to the
/// outline rectangle's origin. The pixels are shared; rebuilding a shadow
/// swaps in a new `Arc` rather than writing through the old one.
#[derive(Debug, Clone)]
pub struct ShadowBitmap {
    pub tone: ShadowTone,
    pub pixmap: Arc<Pixmap>,
    pub offset: Vec2,
}

/// Every input that affects a variant's bitmaps.
///
/// A variant rebuilds only when this differs from what it last built with.
/// Only the bounds size matters: bitmaps are positioned relative to the
/// outline at draw time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShadowInputs {
    size: Vec2,
    inset: Insets,
    appearance: ShapeAppearance,
    elevation: f32,
    light: Color,
    dark: Color,
    in_edit_mode: bool,
}

impl ShadowInputs {
    pub(crate) fn capture(state: &RenderState, bounds: Rect) -> Self {
        Self {
            size: bounds.size,
            inset: state.inset,
            appearance: state.appearance,
            elevation: state.shadow_elevation,
            light: state.shadow_color_light,
            dark: state.shadow_color_dark,
            in_edit_mode: state.in_edit_mode,
        }
    }
}

/// The active shadow strategy of a drawable.
#[derive(Debug, Clone)]
pub enum Shadow {
    Flat(FlatShape),
    Pressed(PressedShape),
    Basin(BasinShape),
}

impl Shadow {
    /// Builds the strategy for `variant`, bound to `state`. No bitmaps yet.
    pub fn for_variant(variant: ShapeVariant, state: SharedState) -> Self {
        match variant {
            ShapeVariant::Flat => Shadow::Flat(FlatShape::new(state)),
            ShapeVariant::Pressed => Shadow::Pressed(PressedShape::new(state)),
            ShapeVariant::Basin => Shadow::Basin(BasinShape::new(state)),
        }
    }

    pub fn variant(&self) -> ShapeVariant {
        match self {
            Shadow::Flat(_) => ShapeVariant::Flat,
            Shadow::Pressed(_) => ShapeVariant::Pressed,
            Shadow::Basin(_) => ShapeVariant::Basin,
        }
    }

    /// Re-targets the strategy at a forked state.
    pub fn set_drawable_state(&mut self, state: SharedState) {
        match self {
            Shadow::Flat(s) => s.set_drawable_state(state),
            Shadow::Pressed(s) => s.set_drawable_state(state),
            Shadow::Basin(s) => s.set_drawable_state(state),
        }
    }

    /// Renders the bitmaps for `bounds` unless nothing changed since the last
    /// call. Returns `true` when a rebuild happened.
    pub fn update_shadow_bitmap(&mut self, bounds: Rect) -> bool {
        match self {
            Shadow::Flat(s) => s.update_shadow_bitmap(bounds),
            Shadow::Pressed(s) => s.update_shadow_bitmap(bounds),
            Shadow::Basin(s) => s.update_shadow_bitmap(bounds),
        }
    }

    /// Composites the prepared bitmaps onto `canvas` against `outline`.
    pub fn draw(&self, canvas: &mut Pixmap, outline: &Outline) {
        match self {
            Shadow::Flat(s) => s.draw(canvas, outline),
            Shadow::Pressed(s) => s.draw(canvas, outline),
            Shadow::Basin(s) => s.draw(canvas, outline),
        }
    }

    /// Currently prepared bitmaps, in draw order.
    pub fn layers(&self) -> &[ShadowBitmap] {
        match self {
            Shadow::Flat(s) => s.layers(),
            Shadow::Pressed(s) => s.layers(),
            Shadow::Basin(s) => s.layers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_variant_round_trips_known_values() {
        for (raw, v) in [(0, ShapeVariant::Flat), (1, ShapeVariant::Pressed), (2, ShapeVariant::Basin)] {
            assert_eq!(ShapeVariant::try_from(raw).unwrap(), v);
        }
    }

    #[test]
    fn raw_variant_rejects_unknown() {
        let err = ShapeVariant::try_from(3).unwrap_err();
        assert_eq!(err.to_string(), "ShapeVariant(3) is invalid");
        assert!(ShapeVariant::try_from(-1).is_err());
    }

    #[test]
    fn for_variant_matches_request() {
        let state = RenderState::default().into_shared();
        for v in [ShapeVariant::Flat, ShapeVariant::Pressed, ShapeVariant::Basin] {
            let shadow = Shadow::for_variant(v, state.clone());
            assert_eq!(shadow.variant(), v);
            assert!(shadow.layers().is_empty());
        }
    }
}
