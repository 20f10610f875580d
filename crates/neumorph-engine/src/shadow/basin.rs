use std::sync::Arc;

use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::blur::blur_radius_for;
use crate::coords::{Rect, Vec2};
use crate::drawable::SharedState;
use crate::shape::{compute_outline, Outline};

use super::layer;
use super::{ShadowBitmap, ShadowInputs, ShadowTone};

/// Band shift as a fraction of the blur radius.
const BAND_SHIFT: f32 = 0.5;
/// Final blur as a multiple of the base blur radius.
const BLUR_SPREAD: f32 = 1.5;

/// Bowl: the same two inner bands as [`PressedShape`](super::PressedShape),
/// shifted half as far and blended into a single bitmap before a wider blur,
/// so the rim reads as one continuous concave gradient.
#[derive(Debug, Clone)]
pub struct BasinShape {
    state: SharedState,
    built_for: Option<ShadowInputs>,
    layers: Vec<ShadowBitmap>,
}

impl BasinShape {
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
        let radius = blur_radius_for(state.shadow_elevation);

        if radius > 0.0 {
            let blended = compute_outline(bounds, state.inset, &state.appearance).and_then(|outline| {
                let (w, h) = outline.bounds().pixel_size()?;
                let local = outline.at_origin();
                let shift = radius * BAND_SHIFT;

                let mut out = layer::alloc(w, h)?;
                for (color, dir) in [(state.shadow_color_dark, -1.0), (state.shadow_color_light, 1.0)] {
                    if let Some(band) = layer::inner_band(w, h, &local, Vec2::splat(dir * shift), color) {
                        out.draw_pixmap(0, 0, band.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
                    }
                }
                layer::soften(&mut out, radius * BLUR_SPREAD, state.in_edit_mode);
                Some(out)
            });

            if let Some(pixmap) = blended {
                self.layers.push(ShadowBitmap {
                    tone: ShadowTone::Blended,
                    pixmap: Arc::new(pixmap),
                    offset: Vec2::zero(),
                });
            }
        }

        log::trace!("basin shadow rebuilt: {} layer(s) for {:?}", self.layers.len(), bounds);
        drop(state);
        self.built_for = Some(inputs);
        true
    }

    pub fn draw(&self, canvas: &mut Pixmap, outline: &Outline) {
        let Some(bitmap) = self.layers.first() else { return; };
        let Some(mask) = layer::outline_mask(canvas, outline, true) else { return; };
        layer::draw_layer(canvas, &bitmap.pixmap, outline.bounds().origin + bitmap.offset, Some(&mask));
    }
}
