use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::blur::blur_radius_for;
use crate::coords::{Rect, Vec2};
use crate::drawable::SharedState;
use crate::shape::{compute_outline, Outline};

use super::layer;
use super::{ShadowBitmap, ShadowInputs, ShadowTone};

/// Dent: two inner shadows clipped to the outline. The dark band hugs the
/// bottom-right inner edge, the light band the top-left one; each is its own
/// bitmap the size of the outline rectangle.
#[derive(Debug, Clone)]
pub struct PressedShape {
    state: SharedState,
    built_for: Option<ShadowInputs>,
    layers: Vec<ShadowBitmap>,
}

impl PressedShape {
    pub fn new(state: SharedState) -> Self {
        Self { state, built_for: None, layers: Vec::new() }
    }

    pub fn set_drawable_state(&mut self, state: SharedState) {
        self.state = state;
    }

    pub fn layers(&self) -> &[ShadowBitmap] {
        &self.layers
    }

    pub fn update_shadow_bitmap(&mut self, bounds: Rect) -> bool {
        let state = self.state.borrow();
        let inputs = ShadowInputs::capture(&state, bounds);
        if self.built_for.as_ref() == Some(&inputs) {
            return false;
        }

        self.layers.clear();
        let elevation = state.shadow_elevation;
        let radius = blur_radius_for(elevation);

        let outline = compute_outline(bounds, state.inset, &state.appearance);
        if let (true, Some(outline)) = (radius > 0.0, outline) {
            let local = outline.at_origin();
            if let Some((w, h)) = outline.bounds().pixel_size() {
                for (tone, color, shift) in [
                    (ShadowTone::Dark, state.shadow_color_dark, -elevation),
                    (ShadowTone::Light, state.shadow_color_light, elevation),
                ] {
                    let Some(mut pixmap) = layer::inner_band(w, h, &local, Vec2::splat(shift), color) else {
                        continue;
                    };
                    layer::soften(&mut pixmap, radius, state.in_edit_mode);
                    self.layers.push(ShadowBitmap { tone, pixmap: Arc::new(pixmap), offset: Vec2::zero() });
                }
            }
        }

        log::trace!("pressed shadow rebuilt: {} layer(s) for {:?}", self.layers.len(), bounds);
        drop(state);
        self.built_for = Some(inputs);
        true
    }

    pub fn draw(&self, canvas: &mut Pixmap, outline: &Outline) {
        if self.layers.is_empty() {
            return;
        }
        let Some(mask) = layer::outline_mask(canvas, outline, true) else { return; };
        for bitmap in &self.layers {
            layer::draw_layer(canvas, &bitmap.pixmap, outline.bounds().origin + bitmap.offset, Some(&mask));
        }
    }
}
