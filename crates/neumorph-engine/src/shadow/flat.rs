use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::blur::blur_radius_for;
use crate::coords::{Rect, Vec2};
use crate::drawable::SharedState;
use crate::paint::Color;
use crate::shape::{compute_outline, Outline};

use super::layer;
use super::{ShadowBitmap, ShadowInputs, ShadowTone};

/// Raised surface: two blurred copies of the outline drawn outside it, the
/// light one toward the top-left and the dark one toward the bottom-right.
///
/// Bitmaps are padded by the elevation on every side so the blur has room,
/// up to the outline's longer side.
/// The diagonal distance is `z = elevation + translation_z`; translation is
/// read at draw time so changing it never re-blurs.
#[derive(Debug, Clone)]
pub struct FlatShape {
    state: SharedState,
    built_for: Option<ShadowInputs>,
    layers: Vec<ShadowBitmap>,
}

impl FlatShape {
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

        if radius > 0.0 {
            if let Some(outline) = compute_outline(bounds, state.inset, &state.appearance) {
                // The blur kernel never reaches past the longer side, so
                // neither does the padding.
                let longest = outline.bounds().width().max(outline.bounds().height());
                let pad = radius.ceil().min(longest.ceil());
                let local = outline.at_origin().translate(Vec2::splat(pad));
                let base = Vec2::splat(-pad);

                for (tone, color, dir) in [
                    (ShadowTone::Light, state.shadow_color_light, -1.0),
                    (ShadowTone::Dark, state.shadow_color_dark, 1.0),
                ] {
                    let Some(pixmap) = render_copy(&outline, &local, pad, color, radius, state.in_edit_mode) else {
                        continue;
                    };
                    self.layers.push(ShadowBitmap {
                        tone,
                        pixmap: Arc::new(pixmap),
                        offset: base + Vec2::splat(dir * elevation),
                    });
                }
            }
        }

        log::trace!("flat shadow rebuilt: {} layer(s) for {:?}", self.layers.len(), bounds);
        drop(state);
        self.built_for = Some(inputs);
        true
    }

    pub fn draw(&self, canvas: &mut Pixmap, outline: &Outline) {
        if self.layers.is_empty() {
            return;
        }
        let translation_z = self.state.borrow().translation_z;
        let Some(mask) = layer::outline_mask(canvas, outline, false) else { return; };

        for bitmap in &self.layers {
            let dir = match bitmap.tone {
                ShadowTone::Light => -1.0,
                _ => 1.0,
            };
            let at = outline.bounds().origin + bitmap.offset + Vec2::splat(dir * translation_z);
            layer::draw_layer(canvas, &bitmap.pixmap, at, Some(&mask));
        }
    }
}

fn render_copy(
    outline: &Outline,
    local: &Outline,
    pad: f32,
    color: Color,
    radius: f32,
    in_edit_mode: bool,
) -> Option<Pixmap> {
    let (w, h) = outline.bounds().pixel_size()?;
    let mut pixmap = layer::alloc_padded(w, h, pad as u32)?;
    layer::fill_outline(&mut pixmap, local, color);
    layer::soften(&mut pixmap, radius, in_edit_mode);
    Some(pixmap)
}
