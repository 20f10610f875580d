use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use crate::coords::{Insets, Rect};
use crate::drawable::RenderState;
use crate::paint::{Color, ColorStateList};
use crate::shadow::ShapeVariant;
use crate::shape::{CornerFamily, Outline, OutlineShape, ShapeAppearance};

/// Structural 64-bit hash of a cache key.
pub trait Fingerprint: Hash {
    fn value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Bit pattern of `value` with `-0.0` folded into `0.0` so the two hash alike.
#[inline]
pub(crate) fn f32_to_bits(value: f32) -> u32 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// Size bucket for `extent`: which `step`-wide band it falls into.
#[inline]
pub(crate) fn bucket(extent: f32, step: u32) -> u32 {
    let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
    extent as u32 / step.max(1)
}

/// Identity of a prepared shadow.
///
/// Sizes are bucketed, so an entry can be found for bounds that differ
/// slightly from the ones it was built for; the shadow itself re-checks its
/// exact inputs before reuse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShadowKey {
    width: u32,
    height: u32,
    in_edit_mode: bool,
    variant: ShapeVariant,
    elevation: u32,
    light: Color,
    dark: Color,
    background: Option<u64>,
    fill_color: Option<ColorStateList>,
    stroke_width: u32,
    stroke_color: Option<ColorStateList>,
    translation_z: u32,
    inset: Insets,
    appearance: ShapeAppearance,
}

impl ShadowKey {
    pub fn new(state: &RenderState, bounds: Rect, size_step: u32) -> Self {
        Self {
            width: bucket(bounds.width(), size_step),
            height: bucket(bounds.height(), size_step),
            in_edit_mode: state.in_edit_mode,
            variant: state.variant,
            elevation: f32_to_bits(state.shadow_elevation),
            light: state.shadow_color_light,
            dark: state.shadow_color_dark,
            background: state.background.as_ref().map(|image| image.id()),
            fill_color: state.fill_color.clone(),
            stroke_width: f32_to_bits(state.stroke_width),
            stroke_color: state.stroke_color.clone(),
            translation_z: f32_to_bits(state.translation_z),
            inset: state.inset,
            appearance: state.appearance,
        }
    }
}

impl Fingerprint for ShadowKey {}

/// Identity of a masked background bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitmapKey {
    image: u64,
    width: u32,
    height: u32,
    family: CornerFamily,
    radius: u32,
}

impl BitmapKey {
    pub fn new(image: u64, outline: &Outline, size_step: u32) -> Self {
        let bounds = outline.bounds();
        let family = match outline.shape() {
            OutlineShape::Oval => CornerFamily::Oval,
            OutlineShape::Rect | OutlineShape::RoundRect { .. } => CornerFamily::Rounded,
        };
        Self {
            image,
            width: bucket(bounds.width(), size_step),
            height: bucket(bounds.height(), size_step),
            family,
            radius: f32_to_bits(outline.corner_radius()),
        }
    }
}

impl Fingerprint for BitmapKey {}
